pub mod event_detail;
pub mod events;
pub mod home;
pub mod login;
pub mod my_events;
pub mod register;
