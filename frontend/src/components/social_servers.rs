use yew::prelude::*;
use web_sys::{HtmlInputElement, MouseEvent};
use wasm_bindgen_futures::spawn_local;
use gloo::dialogs::{alert, confirm};
use log::{error, info};
use shared::search::filter_social_servers;
use shared::time::{format_date_short, short_time};
use shared::{days_label, SocialServer};
use super::photo_size_modal::PhotoSizeModal;
use super::social_server_form::{social_server_type_label, SocialServerForm};
use crate::hooks::use_column_layout::use_column_layout;
use crate::hooks::use_programs::use_programs;
use crate::services::api::ApiClient;
use crate::services::spreadsheet::{is_workbook, save_download, EXPORT_FILE_NAME, WORKBOOK_ACCEPT};

pub const COLUMNS_STORAGE_KEY: &str = "socialServers.columns";

pub const DEFAULT_COLUMNS: &[&str] = &[
    "folio", "name", "email", "school", "program", "park", "schedule", "hours", "type", "status", "startDate",
];

pub fn column_label(key: &str) -> &'static str {
    match key {
        "folio" => "Folio",
        "name" => "Nombre",
        "email" => "Correo",
        "school" => "Escuela",
        "program" => "Programa",
        "park" => "Parque",
        "schedule" => "Horario",
        "hours" => "Horas",
        "type" => "Tipo",
        "status" => "Estatus",
        "startDate" => "Inicio",
        _ => "",
    }
}

pub fn cell_text(key: &str, server: &SocialServer) -> String {
    let text = |value: &Option<String>| value.clone().unwrap_or_default();
    match key {
        "folio" => server.id.to_string(),
        "name" => server.name.clone(),
        "email" => server.email.clone(),
        "school" => text(&server.school),
        "program" => text(&server.program),
        "park" => text(&server.park_name),
        "schedule" => match (&server.days, &server.start_time, &server.end_time) {
            (Some(days), Some(start), Some(end)) => {
                format!("{} {} - {}", days_label(days), short_time(start), short_time(end))
            }
            _ => String::new(),
        },
        "hours" => server
            .total_hours_required
            .map(|h| h.to_string())
            .unwrap_or_default(),
        "type" => server
            .social_server_type
            .as_deref()
            .map(|t| social_server_type_label(t).to_string())
            .unwrap_or_default(),
        "status" => text(&server.status),
        "startDate" => server
            .start_date
            .as_deref()
            .map(format_date_short)
            .unwrap_or_default(),
        _ => String::new(),
    }
}

#[derive(Properties, PartialEq)]
pub struct SocialServersPageProps {
    pub api_client: ApiClient,
    pub is_super_admin: bool,
    pub on_view_attendances: Callback<SocialServer>,
}

#[function_component(SocialServersPage)]
pub fn social_servers_page(props: &SocialServersPageProps) -> Html {
    let servers = use_state(Vec::<SocialServer>::new);
    let loading = use_state(|| true);
    let reload = use_state(|| 0u32);
    let error_message = use_state(|| Option::<String>::None);
    let query = use_state(String::new);
    let show_form = use_state(|| false);
    let editing = use_state(|| Option::<SocialServer>::None);
    let show_columns = use_state(|| false);
    let show_photo_config = use_state(|| false);
    let transferring = use_state(|| false);
    let import_input = use_node_ref();

    let programs = use_programs(&props.api_client);
    let columns = use_column_layout(COLUMNS_STORAGE_KEY, DEFAULT_COLUMNS);

    use_effect_with(*reload, {
        let servers = servers.clone();
        let loading = loading.clone();
        let error_message = error_message.clone();
        let api_client = props.api_client.clone();
        move |_| {
            spawn_local(async move {
                loading.set(true);
                match api_client.get_social_servers().await {
                    Ok(list) => servers.set(list),
                    Err(e) => {
                        error!("Failed to load social servers: {}", e);
                        error_message.set(Some(format!("Error al cargar los servidores sociales: {}", e)));
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

    let open_create = {
        let editing = editing.clone();
        let show_form = show_form.clone();
        Callback::from(move |_: MouseEvent| {
            editing.set(None);
            show_form.set(true);
        })
    };

    let close_form = {
        let show_form = show_form.clone();
        Callback::from(move |_| show_form.set(false))
    };

    let on_saved = {
        let show_form = show_form.clone();
        let reload = reload.clone();
        let refresh_programs = programs.actions.refresh.clone();
        Callback::from(move |_| {
            show_form.set(false);
            reload.set(*reload + 1);
            // Schedule occupancy changed
            refresh_programs.emit(());
        })
    };

    let on_delete = {
        let api_client = props.api_client.clone();
        let error_message = error_message.clone();
        let reload = reload.clone();
        Callback::from(move |server: SocialServer| {
            if !confirm("¿Está seguro de que desea eliminar este servidor social?") {
                return;
            }
            let api_client = api_client.clone();
            let error_message = error_message.clone();
            let reload = reload.clone();
            spawn_local(async move {
                match api_client.delete_social_server(server.id).await {
                    Ok(()) => {
                        info!("Deleted social server {}", server.id);
                        reload.set(*reload + 1);
                    }
                    Err(e) => error_message.set(Some(e.to_string())),
                }
            });
        })
    };

    let pick_workbook = {
        let import_input = import_input.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(input) = import_input.cast::<HtmlInputElement>() {
                input.click();
            }
        })
    };

    let on_import = {
        let api_client = props.api_client.clone();
        let error_message = error_message.clone();
        let transferring = transferring.clone();
        let reload = reload.clone();
        let refresh_programs = programs.actions.refresh.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let Some(workbook) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            // Allow picking the same file again
            input.set_value("");

            if !is_workbook(&workbook.name()) {
                error_message.set(Some("Seleccione un archivo de Excel (.xlsx o .xls)".to_string()));
                return;
            }

            let api_client = api_client.clone();
            let error_message = error_message.clone();
            let transferring = transferring.clone();
            let reload = reload.clone();
            let refresh_programs = refresh_programs.clone();
            transferring.set(true);
            error_message.set(None);
            spawn_local(async move {
                match api_client.import_social_servers(&workbook).await {
                    Ok(()) => {
                        info!("Imported social servers from {}", workbook.name());
                        alert("Importación exitosa");
                        reload.set(*reload + 1);
                        refresh_programs.emit(());
                    }
                    Err(e) => {
                        error!("Failed to import social servers: {}", e);
                        error_message.set(Some(format!("Error al importar el archivo: {}", e)));
                    }
                }
                transferring.set(false);
            });
        })
    };

    let on_export = {
        let api_client = props.api_client.clone();
        let error_message = error_message.clone();
        let transferring = transferring.clone();
        Callback::from(move |_: MouseEvent| {
            let api_client = api_client.clone();
            let error_message = error_message.clone();
            let transferring = transferring.clone();
            transferring.set(true);
            spawn_local(async move {
                let saved = match api_client.export_social_servers().await {
                    Ok(bytes) => save_download(&bytes, EXPORT_FILE_NAME)
                        .map_err(|e| format!("{:?}", e)),
                    Err(e) => Err(e.to_string()),
                };
                if let Err(reason) = saved {
                    error!("Failed to export social servers: {}", reason);
                    error_message.set(Some(format!("Error al exportar el archivo: {}", reason)));
                }
                transferring.set(false);
            });
        })
    };

    let toggle_columns = {
        let show_columns = show_columns.clone();
        Callback::from(move |_: MouseEvent| show_columns.set(!*show_columns))
    };

    let open_photo_config = {
        let show_photo_config = show_photo_config.clone();
        Callback::from(move |_: MouseEvent| show_photo_config.set(true))
    };

    let close_photo_config = {
        let show_photo_config = show_photo_config.clone();
        Callback::from(move |_| show_photo_config.set(false))
    };

    let visible = columns.layout.visible();
    let filtered = filter_social_servers(&servers, &query);

    html! {
        <div class="social-servers-page">
            <div class="page-header">
                <h2>{"Servidores Sociales"}</h2>
                <div class="header-actions">
                    {if props.is_super_admin {
                        html! { <button class="btn btn-secondary" onclick={open_photo_config}>{"Configurar Tamaño"}</button> }
                    } else {
                        html! {}
                    }}
                    <input
                        ref={import_input}
                        type="file"
                        style="display: none"
                        accept={WORKBOOK_ACCEPT}
                        onchange={on_import}
                    />
                    <button class="btn btn-secondary" onclick={pick_workbook} disabled={*transferring}>{"Importar Excel"}</button>
                    <button class="btn btn-secondary" onclick={on_export} disabled={*transferring}>{"Exportar Excel"}</button>
                    <button class="btn btn-secondary" onclick={toggle_columns}>{"Columnas"}</button>
                    <button class="btn btn-primary" onclick={open_create}>{"Nuevo Servidor Social"}</button>
                </div>
            </div>

            {if let Some(error) = (*error_message).clone() {
                html! { <div class="form-error">{error}</div> }
            } else {
                html! {}
            }}

            {if *show_columns {
                let reset = columns.actions.reset.reform(|_: MouseEvent| ());
                html! {
                    <div class="column-settings">
                        {for columns.layout.columns().iter().map(|column| {
                            let key = column.key.clone();
                            let on_toggle = columns.actions.toggle.reform({
                                let key = key.clone();
                                move |_: Event| key.clone()
                            });
                            let on_left = columns.actions.move_left.reform({
                                let key = key.clone();
                                move |_: MouseEvent| key.clone()
                            });
                            let on_right = columns.actions.move_right.reform({
                                let key = key.clone();
                                move |_: MouseEvent| key.clone()
                            });
                            html! {
                                <div class="column-setting" key={key.clone()}>
                                    <button class="btn btn-link" onclick={on_left}>{"←"}</button>
                                    <label class="checkbox">
                                        <input type="checkbox" checked={column.visible} onchange={on_toggle} />
                                        {column_label(&key)}
                                    </label>
                                    <button class="btn btn-link" onclick={on_right}>{"→"}</button>
                                </div>
                            }
                        })}
                        <button class="btn btn-link" onclick={reset}>{"Restablecer"}</button>
                    </div>
                }
            } else {
                html! {}
            }}

            <input
                class="search-input"
                type="search"
                placeholder="Buscar por nombre, correo, escuela o folio"
                value={(*query).clone()}
                oninput={on_search}
            />

            {if *loading && servers.is_empty() {
                html! { <div class="loading">{"Cargando..."}</div> }
            } else if filtered.is_empty() {
                html! { <p class="empty">{"No se encontraron servidores sociales."}</p> }
            } else {
                html! {
                    <table class="data-table">
                        <thead>
                            <tr>
                                {for visible.iter().map(|key| html! { <th key={key.to_string()}>{column_label(key)}</th> })}
                                <th>{"Acciones"}</th>
                            </tr>
                        </thead>
                        <tbody>
                            {for filtered.iter().map(|server| {
                                let on_edit = {
                                    let server = (*server).clone();
                                    let editing = editing.clone();
                                    let show_form = show_form.clone();
                                    Callback::from(move |_: MouseEvent| {
                                        editing.set(Some(server.clone()));
                                        show_form.set(true);
                                    })
                                };
                                let on_delete = {
                                    let server = (*server).clone();
                                    on_delete.reform(move |_: MouseEvent| server.clone())
                                };
                                let on_attendances = {
                                    let server = (*server).clone();
                                    props.on_view_attendances.reform(move |_: MouseEvent| server.clone())
                                };
                                html! {
                                    <tr key={server.id}>
                                        {for visible.iter().map(|key| html! { <td>{cell_text(key, server)}</td> })}
                                        <td class="actions">
                                            <button class="btn btn-soft" onclick={on_attendances}>{"Asistencias"}</button>
                                            <button class="btn btn-soft" onclick={on_edit}>{"Editar"}</button>
                                            <button class="btn btn-danger" onclick={on_delete}>{"Eliminar"}</button>
                                        </td>
                                    </tr>
                                }
                            })}
                        </tbody>
                    </table>
                }
            }}

            <SocialServerForm
                is_open={*show_form}
                server={(*editing).clone()}
                programs={programs.state.programs.clone()}
                api_client={props.api_client.clone()}
                on_success={on_saved}
                on_close={close_form}
            />

            <PhotoSizeModal
                is_open={*show_photo_config}
                api_client={props.api_client.clone()}
                on_close={close_photo_config}
            />
        </div>
    }
}
