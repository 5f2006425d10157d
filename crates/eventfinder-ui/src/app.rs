use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::{
    components::{Route, Router, Routes},
    ParamSegment, StaticSegment,
};

use crate::auth::{provide_auth, AuthRedirects};
use crate::components::nav::Nav;
use crate::components::toast::ToastProvider;
use crate::pages::event_detail::EventDetailPage;
use crate::pages::events::EventsPage;
use crate::pages::home::HomePage;
use crate::pages::login::LoginPage;
use crate::pages::my_events::MyEventsPage;
use crate::pages::register::RegisterPage;

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <MetaTags />
            </head>
            <body>
                <App />
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_auth();

    view! {
        <Stylesheet id="leptos" href="/pkg/eventfinder-web.css" />
        <Title text="Event Finder" />
        <ToastProvider>
            <Router>
                <AuthRedirects />
                <Routes fallback=|| view! { <Layout><p>"Page not found."</p></Layout> }.into_any()>
                    <Route path=StaticSegment("") view=HomeView />
                    <Route path=StaticSegment("events") view=EventsView />
                    <Route path=(StaticSegment("events"), ParamSegment("id")) view=EventDetailView />
                    <Route path=StaticSegment("login") view=LoginView />
                    <Route path=StaticSegment("register") view=RegisterView />
                    <Route path=StaticSegment("my-events") view=MyEventsView />
                </Routes>
            </Router>
        </ToastProvider>
    }
}

#[component]
fn Layout(children: Children) -> impl IntoView {
    view! {
        <div class="app-layout">
            <Nav />
            <main class="main-content">{children()}</main>
        </div>
    }
}

#[component]
fn HomeView() -> impl IntoView {
    view! { <Layout><HomePage /></Layout> }
}

#[component]
fn EventsView() -> impl IntoView {
    view! { <Layout><EventsPage /></Layout> }
}

#[component]
fn EventDetailView() -> impl IntoView {
    view! { <Layout><EventDetailPage /></Layout> }
}

#[component]
fn LoginView() -> impl IntoView {
    view! { <Layout><LoginPage /></Layout> }
}

#[component]
fn RegisterView() -> impl IntoView {
    view! { <Layout><RegisterPage /></Layout> }
}

#[component]
fn MyEventsView() -> impl IntoView {
    view! { <Layout><MyEventsPage /></Layout> }
}
