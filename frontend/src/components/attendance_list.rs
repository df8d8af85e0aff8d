use yew::prelude::*;
use web_sys::{HtmlInputElement, MouseEvent};
use wasm_bindgen_futures::spawn_local;
use log::error;
use shared::search::filter_attendances;
use shared::time::format_timestamp;
use shared::{Attendance, AttendanceType};
use super::photo_size_modal::PhotoSizeModal;
use crate::config::AppConfig;
use crate::routes::AttendanceFilter;
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct AttendancesPageProps {
    pub api_client: ApiClient,
    pub config: AppConfig,
    pub is_super_admin: bool,
    #[prop_or_default]
    pub filter: Option<AttendanceFilter>,
    pub on_clear_filter: Callback<()>,
}

#[function_component(AttendancesPage)]
pub fn attendances_page(props: &AttendancesPageProps) -> Html {
    let attendances = use_state(Vec::<Attendance>::new);
    let loading = use_state(|| true);
    let error_message = use_state(|| Option::<String>::None);
    let query = use_state(String::new);
    let show_photo_config = use_state(|| false);

    use_effect_with(props.filter.clone(), {
        let attendances = attendances.clone();
        let loading = loading.clone();
        let error_message = error_message.clone();
        let api_client = props.api_client.clone();
        move |filter| {
            let filter = filter.clone();
            spawn_local(async move {
                loading.set(true);
                let result = match &filter {
                    Some(f) => api_client.get_attendances_for(f.server_id).await,
                    None => api_client.get_attendances().await,
                };
                match result {
                    Ok(list) => {
                        attendances.set(list);
                        error_message.set(None);
                    }
                    Err(e) => {
                        error!("Failed to load attendances: {}", e);
                        error_message.set(Some(format!("Error al cargar las asistencias: {}", e)));
                    }
                }
                loading.set(false);
            });
            || ()
        }
    });

    let on_search = {
        let query = query.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            query.set(input.value());
        })
    };

    let on_back = props.on_clear_filter.reform(|_: MouseEvent| ());

    let open_photo_config = {
        let show_photo_config = show_photo_config.clone();
        Callback::from(move |_: MouseEvent| show_photo_config.set(true))
    };

    let close_photo_config = {
        let show_photo_config = show_photo_config.clone();
        Callback::from(move |_| show_photo_config.set(false))
    };

    let filtered = filter_attendances(&attendances, &query);

    html! {
        <div class="attendances-page">
            <div class="page-header">
                <h2>{"Asistencias"}</h2>
                <div class="header-actions">
                    {if props.is_super_admin {
                        html! { <button class="btn btn-secondary" onclick={open_photo_config}>{"Configurar Tamaño"}</button> }
                    } else {
                        html! {}
                    }}
                    {if props.filter.is_some() {
                        html! { <button class="btn btn-secondary" onclick={on_back}>{"← Volver a todas las asistencias"}</button> }
                    } else {
                        html! {}
                    }}
                </div>
            </div>

            {if let Some(filter) = &props.filter {
                html! { <h3 class="user-info">{format!("Asistencias de: {}", filter.server_name)}</h3> }
            } else {
                html! {}
            }}

            {if let Some(error) = (*error_message).clone() {
                html! { <div class="form-error">{error}</div> }
            } else {
                html! {}
            }}

            <input
                class="search-input"
                type="search"
                placeholder="Buscar por nombre, correo o parque"
                value={(*query).clone()}
                oninput={on_search}
            />

            {if *loading {
                html! { <div class="loading">{"Cargando..."}</div> }
            } else if filtered.is_empty() {
                html! { <p class="empty">{"No hay asistencias registradas."}</p> }
            } else {
                html! {
                    <table class="data-table">
                        <thead>
                            <tr>
                                <th>{"Servidor social"}</th>
                                <th>{"Correo"}</th>
                                <th>{"Parque"}</th>
                                <th>{"Tipo"}</th>
                                <th>{"Fecha y hora"}</th>
                                <th>{"Foto"}</th>
                            </tr>
                        </thead>
                        <tbody>
                            {for filtered.iter().map(|attendance| html! {
                                <tr key={attendance.id}>
                                    <td>{attendance.social_server_name.clone()}</td>
                                    <td>{attendance.social_server_email.clone().unwrap_or_default()}</td>
                                    <td>{attendance.park_name.clone()}</td>
                                    <td>
                                        <span class={classes!(
                                            "attendance-type",
                                            if attendance.attendance_type == AttendanceType::CheckIn { "check-in" } else { "check-out" }
                                        )}>
                                            {attendance.attendance_type.label()}
                                        </span>
                                    </td>
                                    <td>{format_timestamp(&attendance.timestamp)}</td>
                                    <td>
                                        {match &attendance.photo_path {
                                            Some(path) => html! {
                                                <a href={props.config.photo_url(path)} target="_blank" rel="noopener noreferrer">{"Ver foto"}</a>
                                            },
                                            None => html! { "-" },
                                        }}
                                    </td>
                                </tr>
                            })}
                        </tbody>
                    </table>
                }
            }}

            <PhotoSizeModal
                is_open={*show_photo_config}
                api_client={props.api_client.clone()}
                on_close={close_photo_config}
            />
        </div>
    }
}
