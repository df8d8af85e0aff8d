use yew::prelude::*;
use web_sys::{File, HtmlInputElement, HtmlSelectElement, MouseEvent, Url};
use wasm_bindgen_futures::spawn_local;
use log::{error, info, warn};
use shared::forms::AttendanceDraft;
use shared::{AttendanceType, Park};
use crate::hooks::use_geolocation::{use_geolocation, GeoStatus};
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct AttendanceFormProps {
    pub api_client: ApiClient,
    pub on_login: Callback<()>,
}

fn revoke(preview: &Option<String>) {
    if let Some(url) = preview {
        if Url::revoke_object_url(url).is_err() {
            warn!("Could not release photo preview");
        }
    }
}

#[function_component(AttendanceForm)]
pub fn attendance_form(props: &AttendanceFormProps) -> Html {
    let parks = use_state(Vec::<Park>::new);
    let loading_parks = use_state(|| true);
    let folio = use_state(String::new);
    let park_id = use_state(|| Option::<i64>::None);
    let attendance_type = use_state(|| Option::<AttendanceType>::None);
    let photo = use_state(|| Option::<File>::None);
    let preview = use_state(|| Option::<String>::None);
    let is_submitting = use_state(|| false);
    let error_message = use_state(|| Option::<String>::None);
    let success_message = use_state(|| Option::<String>::None);
    let geolocation = use_geolocation();

    use_effect_with((), {
        let parks = parks.clone();
        let loading_parks = loading_parks.clone();
        let error_message = error_message.clone();
        let api_client = props.api_client.clone();
        move |_| {
            spawn_local(async move {
                match api_client.get_parks().await {
                    Ok(list) => parks.set(list),
                    Err(e) => {
                        error!("Failed to load parks: {}", e);
                        error_message.set(Some(
                            "Error al cargar los parques. Por favor, recarga la página.".to_string(),
                        ));
                    }
                }
                loading_parks.set(false);
            });
            || ()
        }
    });

    let on_folio_input = {
        let folio = folio.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            folio.set(input.value());
        })
    };

    let on_park_change = {
        let park_id = park_id.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            park_id.set(select.value().parse::<i64>().ok());
        })
    };

    let on_type_change = {
        let attendance_type = attendance_type.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            attendance_type.set(AttendanceType::parse(&select.value()));
        })
    };

    let on_photo_change = {
        let photo = photo.clone();
        let preview = preview.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let file = input.files().and_then(|files| files.get(0));
            revoke(&preview);
            preview.set(file.as_ref().and_then(|f| Url::create_object_url_with_blob(f).ok()));
            photo.set(file);
        })
    };

    let on_submit = {
        let folio = folio.clone();
        let park_id = park_id.clone();
        let attendance_type = attendance_type.clone();
        let photo = photo.clone();
        let preview = preview.clone();
        let is_submitting = is_submitting.clone();
        let error_message = error_message.clone();
        let success_message = success_message.clone();
        let location = geolocation.status.location();
        let api_client = props.api_client.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            error_message.set(None);
            success_message.set(None);

            let draft = AttendanceDraft {
                folio: (*folio).clone(),
                park_id: *park_id,
                attendance_type: *attendance_type,
                has_photo: photo.is_some(),
                location,
            };
            let (submission, file) = match (draft.validate(), (*photo).clone()) {
                (Ok(submission), Some(file)) => (submission, file),
                (Err(e), _) => {
                    error_message.set(Some(e.to_string()));
                    return;
                }
                (Ok(_), None) => return,
            };

            is_submitting.set(true);

            let folio = folio.clone();
            let park_id = park_id.clone();
            let attendance_type = attendance_type.clone();
            let photo = photo.clone();
            let preview = preview.clone();
            let is_submitting = is_submitting.clone();
            let error_message = error_message.clone();
            let success_message = success_message.clone();
            let api_client = api_client.clone();

            spawn_local(async move {
                match api_client.register_attendance(&submission, &file).await {
                    Ok(receipt) => {
                        info!(
                            "Registered {} for folio {} in park {}",
                            submission.attendance_type, submission.folio, submission.park_id
                        );
                        success_message.set(Some(
                            receipt
                                .message
                                .unwrap_or_else(|| "Asistencia registrada exitosamente".to_string()),
                        ));
                        folio.set(String::new());
                        park_id.set(None);
                        attendance_type.set(None);
                        revoke(&preview);
                        preview.set(None);
                        photo.set(None);
                    }
                    Err(e) => error_message.set(Some(e.to_string())),
                }
                is_submitting.set(false);
            });
        })
    };

    let retry_location = geolocation.retry.reform(|_: MouseEvent| ());
    let on_login = props.on_login.reform(|_: MouseEvent| ());
    let disabled = *is_submitting;

    html! {
        <div class="form-container">
            <form class="attendance-form" onsubmit={on_submit}>
                <h2>{"Registro de Asistencia"}</h2>

                {if let Some(error) = (*error_message).clone() {
                    html! { <div class="form-error">{error}</div> }
                } else {
                    html! {}
                }}
                {if let Some(message) = (*success_message).clone() {
                    html! { <div class="form-success">{message}</div> }
                } else {
                    html! {}
                }}

                <div class="form-group">
                    <label for="folio">{"Folio"}</label>
                    <input
                        id="folio"
                        type="number"
                        min="1"
                        placeholder="Ingrese su folio"
                        value={(*folio).clone()}
                        oninput={on_folio_input}
                        {disabled}
                    />
                </div>

                <div class="form-group">
                    <label for="park">{"Parque"}</label>
                    <select id="park" onchange={on_park_change} disabled={disabled || *loading_parks}>
                        <option value="" selected={park_id.is_none()}>
                            {if *loading_parks { "Cargando parques..." } else { "Seleccione un parque" }}
                        </option>
                        {for parks.iter().map(|park| html! {
                            <option value={park.id.to_string()} selected={*park_id == Some(park.id)}>
                                {park.park_name.clone()}
                            </option>
                        })}
                    </select>
                </div>

                <div class="form-group">
                    <label for="attendance-type">{"Tipo de registro"}</label>
                    <select id="attendance-type" onchange={on_type_change} {disabled}>
                        <option value="" selected={attendance_type.is_none()}>{"Seleccione el tipo"}</option>
                        {for AttendanceType::ALL.iter().map(|kind| html! {
                            <option value={kind.as_str()} selected={*attendance_type == Some(*kind)}>
                                {kind.label()}
                            </option>
                        })}
                    </select>
                </div>

                <div class="form-group">
                    <label for="photo">{"Fotografía"}</label>
                    <input
                        id="photo"
                        type="file"
                        accept="image/*"
                        capture="environment"
                        onchange={on_photo_change}
                        {disabled}
                    />
                    {if let Some(url) = (*preview).clone() {
                        html! {
                            <div class="image-preview">
                                <img src={url} alt="Vista previa" />
                            </div>
                        }
                    } else {
                        html! {}
                    }}
                </div>

                <div class="location-status">
                    {match &geolocation.status {
                        GeoStatus::Locating => html! { <span>{"Obteniendo ubicación..."}</span> },
                        GeoStatus::Located(point) => html! {
                            <span>{format!("Ubicación: {:.5}, {:.5}", point.latitude, point.longitude)}</span>
                        },
                        GeoStatus::Unavailable(reason) => html! {
                            <span>
                                {format!("Sin ubicación: {} ", reason)}
                                <button type="button" class="btn btn-link" onclick={retry_location}>{"Reintentar"}</button>
                            </span>
                        },
                    }}
                </div>

                <button type="submit" class="btn btn-primary" {disabled}>
                    {if disabled { "Registrando..." } else { "Registrar" }}
                </button>

                <button type="button" class="btn btn-link" onclick={on_login}>
                    {"Acceso administrativo"}
                </button>
            </form>
        </div>
    }
}
