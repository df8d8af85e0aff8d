use yew::prelude::*;
use web_sys::{HtmlInputElement, HtmlSelectElement, MouseEvent};
use wasm_bindgen_futures::spawn_local;
use log::{error, info};
use shared::forms::UserDraft;
use shared::time::format_date_short;
use shared::{Role, User};
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct UserManagementProps {
    pub api_client: ApiClient,
}

#[function_component(UserManagement)]
pub fn user_management(props: &UserManagementProps) -> Html {
    let users = use_state(Vec::<User>::new);
    let loading = use_state(|| true);
    let reload = use_state(|| 0u32);
    let show_form = use_state(|| false);
    let draft = use_state(UserDraft::default);
    let is_submitting = use_state(|| false);
    let error_message = use_state(|| Option::<String>::None);

    use_effect_with(*reload, {
        let users = users.clone();
        let loading = loading.clone();
        let error_message = error_message.clone();
        let api_client = props.api_client.clone();
        move |_| {
            spawn_local(async move {
                loading.set(true);
                match api_client.get_users().await {
                    Ok(list) => users.set(list),
                    Err(e) => {
                        error!("Failed to load users: {}", e);
                        error_message.set(Some(format!("Error al cargar los usuarios: {}", e)));
                    }
                }
                loading.set(false);
            });
            || ()
        }
    });

    let toggle_form = {
        let show_form = show_form.clone();
        let draft = draft.clone();
        let error_message = error_message.clone();
        Callback::from(move |_: MouseEvent| {
            draft.set(UserDraft::default());
            error_message.set(None);
            show_form.set(!*show_form);
        })
    };

    let field = |set: fn(&mut UserDraft, String)| {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*draft).clone();
            set(&mut next, input.value());
            draft.set(next);
        })
    };
    let on_name_change = field(|d, v| d.name = v);
    let on_email_change = field(|d, v| d.email = v);
    let on_password_change = field(|d, v| d.password = v);

    let on_role_change = {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Some(role) = Role::parse(&select.value()) {
                draft.set(UserDraft {
                    role,
                    ..(*draft).clone()
                });
            }
        })
    };

    let on_submit = {
        let draft = draft.clone();
        let show_form = show_form.clone();
        let is_submitting = is_submitting.clone();
        let error_message = error_message.clone();
        let reload = reload.clone();
        let api_client = props.api_client.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let request = match draft.validate() {
                Ok(request) => request,
                Err(e) => {
                    error_message.set(Some(e.to_string()));
                    return;
                }
            };

            is_submitting.set(true);
            error_message.set(None);

            let show_form = show_form.clone();
            let is_submitting = is_submitting.clone();
            let error_message = error_message.clone();
            let reload = reload.clone();
            let api_client = api_client.clone();

            spawn_local(async move {
                match api_client.create_user(&request).await {
                    Ok(user) => {
                        info!("Created user {} with role {}", user.email, user.role.as_str());
                        show_form.set(false);
                        reload.set(*reload + 1);
                    }
                    Err(e) => error_message.set(Some(e.to_string())),
                }
                is_submitting.set(false);
            });
        })
    };

    let disabled = *is_submitting;

    html! {
        <div class="user-management">
            <div class="page-header">
                <h2>{"Usuarios"}</h2>
                <button class="btn btn-primary" onclick={toggle_form}>
                    {if *show_form { "Cancelar" } else { "Nuevo Usuario" }}
                </button>
            </div>

            {if let Some(error) = (*error_message).clone() {
                html! { <div class="form-error">{error}</div> }
            } else {
                html! {}
            }}

            {if *show_form {
                html! {
                    <form class="inline-form" onsubmit={on_submit}>
                        <div class="form-row">
                            <div class="form-group">
                                <label for="user-name">{"Nombre"}</label>
                                <input id="user-name" type="text" value={draft.name.clone()} onchange={on_name_change} {disabled} />
                            </div>
                            <div class="form-group">
                                <label for="user-email">{"Correo"}</label>
                                <input id="user-email" type="email" value={draft.email.clone()} onchange={on_email_change} {disabled} />
                            </div>
                        </div>
                        <div class="form-row">
                            <div class="form-group">
                                <label for="user-password">{"Contraseña"}</label>
                                <input id="user-password" type="password" value={draft.password.clone()} onchange={on_password_change} {disabled} />
                            </div>
                            <div class="form-group">
                                <label for="user-role">{"Rol"}</label>
                                <select id="user-role" onchange={on_role_change} {disabled}>
                                    {for [Role::Admin, Role::SuperAdmin].iter().map(|role| html! {
                                        <option value={role.as_str()} selected={draft.role == *role}>{role.label()}</option>
                                    })}
                                </select>
                            </div>
                        </div>
                        <button type="submit" class="btn btn-primary" {disabled}>
                            {if disabled { "Creando..." } else { "Crear Usuario" }}
                        </button>
                    </form>
                }
            } else {
                html! {}
            }}

            {if *loading && users.is_empty() {
                html! { <div class="loading">{"Cargando..."}</div> }
            } else {
                html! {
                    <table class="data-table">
                        <thead>
                            <tr>
                                <th>{"Nombre"}</th>
                                <th>{"Correo"}</th>
                                <th>{"Rol"}</th>
                                <th>{"Registro"}</th>
                                <th>{"Estado"}</th>
                            </tr>
                        </thead>
                        <tbody>
                            {for users.iter().map(|user| html! {
                                <tr key={user.id}>
                                    <td>{user.name.clone()}</td>
                                    <td>{user.email.clone()}</td>
                                    <td>
                                        <span class={classes!("role-badge", (user.role == Role::SuperAdmin).then_some("super-admin"))}>
                                            {user.role.label()}
                                        </span>
                                    </td>
                                    <td>{user.registration_date.as_deref().map(format_date_short).unwrap_or_default()}</td>
                                    <td>{if user.active.unwrap_or(true) { "Activo" } else { "Inactivo" }}</td>
                                </tr>
                            })}
                        </tbody>
                    </table>
                }
            }}
        </div>
    }
}
