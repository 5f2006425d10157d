pub mod event_card;
pub mod nav;
pub mod status;
pub mod toast;
