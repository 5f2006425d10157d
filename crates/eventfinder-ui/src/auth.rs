use std::sync::Arc;

use eventfinder_client::{ApiClient, SessionStore};
use eventfinder_types::{Session, User};
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

/// Session store and its reactive mirror, shared with every view.
///
/// The store only exists in the browser; during SSR views render from the
/// initial unauthenticated session.
#[derive(Clone, Copy)]
pub struct AuthContext {
    session: RwSignal<Session>,
    redirect: RwSignal<Option<String>>,
    store: StoredValue<Option<Arc<SessionStore>>, LocalStorage>,
}

/// Hands navigation requests from the session store to the router.
#[cfg(feature = "hydrate")]
struct RedirectNavigator(RwSignal<Option<String>>);

#[cfg(feature = "hydrate")]
impl eventfinder_client::Navigator for RedirectNavigator {
    fn navigate(&self, path: &str) {
        self.0.set(Some(path.to_string()));
    }
}

impl AuthContext {
    pub fn session(&self) -> Session {
        self.session.get()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.with(Session::is_authenticated)
    }

    pub fn is_loading(&self) -> bool {
        self.session.with(Session::is_loading)
    }

    pub fn user(&self) -> Option<User> {
        self.session.with(|s| s.user().cloned())
    }

    pub fn error(&self) -> Option<String> {
        self.session.with(|s| s.error().map(str::to_string))
    }

    pub fn store(&self) -> Option<Arc<SessionStore>> {
        self.store.get_value()
    }

    pub fn client(&self) -> Option<ApiClient> {
        self.store.with_value(|store| store.as_ref().map(|s| s.client().clone()))
    }

    /// Queues a client-side navigation, performed by [`AuthRedirects`].
    pub fn redirect_to(&self, path: &str) {
        self.redirect.set(Some(path.to_string()));
    }

    pub fn logout(&self) {
        if let Some(store) = self.store() {
            store.logout();
        }
    }
}

/// Builds the session store on top of browser storage and validates any
/// persisted token. Call once, near the root.
pub fn provide_auth() -> AuthContext {
    let ctx = AuthContext {
        session: RwSignal::new(Session::default()),
        redirect: RwSignal::new(None),
        store: StoredValue::new_local(None),
    };

    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen_futures::spawn_local;

        match connect_browser(ctx) {
            Ok(store) => {
                ctx.store.set_value(Some(store.clone()));
                spawn_local(async move {
                    store.start().await;
                });
            }
            Err(e) => leptos::logging::error!("failed to set up API client: {e}"),
        }
    }

    provide_context(ctx);
    ctx
}

#[cfg(feature = "hydrate")]
fn connect_browser(ctx: AuthContext) -> Result<Arc<SessionStore>, String> {
    use eventfinder_client::{connect, ClientConfig, LocalStorageTokenStore};

    let origin = web_sys::window()
        .ok_or("no window")?
        .location()
        .origin()
        .map_err(|e| format!("{e:?}"))?;

    let store = connect(
        ClientConfig::for_origin(&origin),
        Arc::new(LocalStorageTokenStore),
        Arc::new(RedirectNavigator(ctx.redirect)),
    )
    .map_err(|e| e.to_string())?;

    let session = ctx.session;
    store.subscribe(move |s| session.set(s.clone()));

    Ok(Arc::new(store))
}

pub fn use_auth() -> AuthContext {
    expect_context::<AuthContext>()
}

/// Performs navigations requested by the session store. Must be rendered
/// inside the router.
#[component]
pub fn AuthRedirects() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();

    Effect::new(move |_| {
        if let Some(path) = auth.redirect.get() {
            auth.redirect.set(None);
            navigate(&path, Default::default());
        }
    });
}
