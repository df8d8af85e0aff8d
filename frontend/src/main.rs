use yew::prelude::*;
use log::info;
use shared::{Session, SocialServer};

mod components;
mod config;
mod hooks;
mod routes;
mod services;

use components::attendance_form::AttendanceForm;
use components::attendance_list::AttendancesPage;
use components::login::Login;
use components::navbar::Navbar;
use components::park_management::ParkManagement;
use components::program_management::ProgramManagement;
use components::social_servers::SocialServersPage;
use components::user_management::UserManagement;
use config::AppConfig;
use hooks::use_session::use_session;
use routes::{AppPage, AttendanceFilter};
use services::api::ApiClient;
use services::logging::ConsoleLogger;

#[derive(Properties, PartialEq)]
struct AppProps {
    config: AppConfig,
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let api_client = use_memo(props.config.api_base_url.clone(), |url| ApiClient::new(url.clone()));
    let session = use_session();
    let page = use_state(|| AppPage::landing(session.session.as_ref()));

    let on_navigate = {
        let page = page.clone();
        Callback::from(move |next: AppPage| page.set(next))
    };

    let on_login = {
        let page = page.clone();
        let sign_in = session.actions.sign_in.clone();
        Callback::from(move |new_session: Session| {
            page.set(AppPage::landing(Some(&new_session)));
            sign_in.emit(new_session);
        })
    };

    let on_logout = {
        let page = page.clone();
        let sign_out = session.actions.sign_out.clone();
        Callback::from(move |_: ()| {
            sign_out.emit(());
            page.set(AppPage::Login);
        })
    };

    let on_view_attendances = on_navigate.reform(|server: SocialServer| {
        AppPage::Attendances(Some(AttendanceFilter {
            server_id: server.id,
            server_name: server.name,
        }))
    });

    let current = (*page).clone().resolve(session.session.as_ref());
    let api_client = (*api_client).clone();

    let content = match &current {
        AppPage::Attendance => html! {
            <AttendanceForm
                api_client={api_client.clone()}
                on_login={on_navigate.reform(|_: ()| AppPage::Login)}
            />
        },
        AppPage::Login => html! {
            <Login
                api_client={api_client.clone()}
                {on_login}
                on_attendance={on_navigate.reform(|_: ()| AppPage::Attendance)}
            />
        },
        AppPage::Parks => html! { <ParkManagement api_client={api_client.clone()} /> },
        AppPage::Programs => html! { <ProgramManagement api_client={api_client.clone()} /> },
        AppPage::SocialServers => html! {
            <SocialServersPage
                api_client={api_client.clone()}
                is_super_admin={true}
                {on_view_attendances}
            />
        },
        AppPage::Attendances(filter) => html! {
            <AttendancesPage
                api_client={api_client.clone()}
                config={props.config.clone()}
                is_super_admin={true}
                filter={filter.clone()}
                on_clear_filter={on_navigate.reform(|_: ()| AppPage::Attendances(None))}
            />
        },
        AppPage::Users => html! { <UserManagement api_client={api_client.clone()} /> },
    };

    html! {
        <div class="app">
            {match &session.session {
                Some(active) => html! {
                    <Navbar
                        session={active.clone()}
                        current={current.clone()}
                        on_navigate={on_navigate.clone()}
                        {on_logout}
                    />
                },
                None => html! {},
            }}
            <main class="container">
                {content}
            </main>
        </div>
    }
}

fn main() {
    let config = AppConfig::load();
    if let Err(e) = ConsoleLogger::init(config.log_level) {
        gloo::console::error!(format!("Logger unavailable: {}", e));
    }
    info!("Starting attendance console against {}", config.api_base_url);
    yew::Renderer::<App>::with_props(AppProps { config }).render();
}
