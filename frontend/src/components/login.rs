use yew::prelude::*;
use web_sys::{HtmlInputElement, MouseEvent};
use wasm_bindgen_futures::spawn_local;
use log::warn;
use shared::{LoginRequest, Session};
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct LoginProps {
    pub api_client: ApiClient,
    pub on_login: Callback<Session>,
    pub on_attendance: Callback<()>,
}

#[function_component(Login)]
pub fn login(props: &LoginProps) -> Html {
    let email = use_state(String::new);
    let password = use_state(String::new);
    let is_submitting = use_state(|| false);
    let error_message = use_state(|| Option::<String>::None);

    let on_email_change = {
        let email = email.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            email.set(input.value());
        })
    };

    let on_password_change = {
        let password = password.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            password.set(input.value());
        })
    };

    let on_submit = {
        let email = email.clone();
        let password = password.clone();
        let is_submitting = is_submitting.clone();
        let error_message = error_message.clone();
        let on_login = props.on_login.clone();
        let api_client = props.api_client.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let request = LoginRequest {
                email: email.trim().to_string(),
                password: (*password).clone(),
            };
            if request.email.is_empty() || request.password.is_empty() {
                error_message.set(Some("Ingrese correo y contraseña".to_string()));
                return;
            }

            is_submitting.set(true);
            error_message.set(None);

            let is_submitting = is_submitting.clone();
            let error_message = error_message.clone();
            let on_login = on_login.clone();
            let api_client = api_client.clone();

            spawn_local(async move {
                match api_client.login(&request).await {
                    Ok(response) => {
                        is_submitting.set(false);
                        on_login.emit(Session::from(response));
                    }
                    Err(e) => {
                        warn!("Login failed for {}: {}", request.email, e);
                        is_submitting.set(false);
                        error_message.set(Some(e.to_string()));
                    }
                }
            });
        })
    };

    let on_attendance = props.on_attendance.reform(|_: MouseEvent| ());

    html! {
        <div class="form-container">
            <form class="login-form" onsubmit={on_submit}>
                <h2>{"Iniciar Sesión"}</h2>

                {if let Some(error) = (*error_message).clone() {
                    html! { <div class="form-error">{error}</div> }
                } else {
                    html! {}
                }}

                <div class="form-group">
                    <label for="login-email">{"Correo"}</label>
                    <input
                        id="login-email"
                        type="email"
                        value={(*email).clone()}
                        onchange={on_email_change}
                        disabled={*is_submitting}
                        autofocus={true}
                    />
                </div>
                <div class="form-group">
                    <label for="login-password">{"Contraseña"}</label>
                    <input
                        id="login-password"
                        type="password"
                        value={(*password).clone()}
                        onchange={on_password_change}
                        disabled={*is_submitting}
                    />
                </div>

                <button type="submit" class="btn btn-primary" disabled={*is_submitting}>
                    {if *is_submitting { "Ingresando..." } else { "Ingresar" }}
                </button>
                <button type="button" class="btn btn-link" onclick={on_attendance}>
                    {"Registrar asistencia"}
                </button>
            </form>
        </div>
    }
}
