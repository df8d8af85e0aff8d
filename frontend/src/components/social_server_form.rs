use yew::prelude::*;
use web_sys::{HtmlInputElement, HtmlSelectElement, MouseEvent};
use wasm_bindgen_futures::spawn_local;
use log::info;
use shared::forms::{SocialServerDraft, SOCIAL_SERVER_TYPES};
use shared::grouping::schedules_for_park;
use shared::time::short_time;
use shared::{days_label, Program, Schedule, SocialServer};
use crate::services::api::ApiClient;

pub fn social_server_type_label(value: &str) -> &str {
    match value {
        "SERVICIO_SOCIAL" => "Servicio social",
        "PRACTICAS_PROFESIONALES" => "Prácticas profesionales",
        "VOLUNTARIADO" => "Voluntariado",
        other => other,
    }
}

/// Option text for a schedule, flagging schedules that are already full
pub fn schedule_option_label(schedule: &Schedule) -> String {
    let mut label = format!(
        "{} {} - {} ({}/{})",
        days_label(&schedule.days),
        short_time(&schedule.start_time),
        short_time(&schedule.end_time),
        schedule.occupied(),
        schedule.capacity_or_zero()
    );
    if let Some(career) = &schedule.career {
        label.push_str(&format!(" · {}", career));
    }
    if !schedule.has_vacancy() {
        label.push_str(" · lleno");
    }
    label
}

fn parse_id(value: &str) -> Option<i64> {
    value.parse::<i64>().ok()
}

type Setter = fn(&mut SocialServerDraft, String);

fn bind(draft: &UseStateHandle<SocialServerDraft>, set: Setter) -> Callback<Event> {
    let draft = draft.clone();
    Callback::from(move |e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let mut next = (*draft).clone();
        set(&mut next, input.value());
        draft.set(next);
    })
}

fn text_field(id: &'static str, label: &'static str, input_type: &'static str, value: &str, onchange: Callback<Event>, disabled: bool) -> Html {
    html! {
        <div class="form-group">
            <label for={id}>{label}</label>
            <input {id} type={input_type} value={value.to_string()} {onchange} {disabled} />
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct SocialServerFormProps {
    pub is_open: bool,
    pub server: Option<SocialServer>,
    pub programs: Vec<Program>,
    pub api_client: ApiClient,
    pub on_success: Callback<()>,
    pub on_close: Callback<()>,
}

#[function_component(SocialServerForm)]
pub fn social_server_form(props: &SocialServerFormProps) -> Html {
    let draft = use_state(SocialServerDraft::default);
    let is_submitting = use_state(|| false);
    let error_message = use_state(|| Option::<String>::None);

    use_effect_with((props.is_open, props.server.clone()), {
        let draft = draft.clone();
        let is_submitting = is_submitting.clone();
        let error_message = error_message.clone();
        move |(is_open, server)| {
            if *is_open {
                draft.set(server.as_ref().map(SocialServerDraft::from_social_server).unwrap_or_default());
                is_submitting.set(false);
                error_message.set(None);
            }
            || ()
        }
    });

    let selected_program = draft
        .program_id
        .and_then(|id| props.programs.iter().find(|p| p.id == id))
        .or_else(|| {
            // Older records carry only the park and schedule
            draft.schedule_id.and_then(|sid| {
                props
                    .programs
                    .iter()
                    .find(|p| p.parks.iter().any(|park| park.schedules.iter().any(|s| s.id == sid)))
            })
        });

    let schedules = match (selected_program, draft.park_id) {
        (Some(program), Some(park_id)) => schedules_for_park(program, park_id),
        _ => Vec::new(),
    };

    let on_program_change = {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            draft.set(SocialServerDraft {
                program_id: parse_id(&select.value()),
                park_id: None,
                schedule_id: None,
                ..(*draft).clone()
            });
        })
    };

    let on_park_change = {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            draft.set(SocialServerDraft {
                park_id: parse_id(&select.value()),
                schedule_id: None,
                ..(*draft).clone()
            });
        })
    };

    let on_schedule_change = {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            draft.set(SocialServerDraft {
                schedule_id: parse_id(&select.value()),
                ..(*draft).clone()
            });
        })
    };

    let on_type_change = {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            draft.set(SocialServerDraft {
                social_server_type: select.value(),
                ..(*draft).clone()
            });
        })
    };

    let on_badge_change = {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            draft.set(SocialServerDraft {
                badge: input.checked(),
                ..(*draft).clone()
            });
        })
    };

    let on_submit = {
        let draft = draft.clone();
        let is_submitting = is_submitting.clone();
        let error_message = error_message.clone();
        let on_success = props.on_success.clone();
        let api_client = props.api_client.clone();
        let editing = props.server.as_ref().map(|s| s.id);

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

            let is_submitting = is_submitting.clone();
            let error_message = error_message.clone();
            let on_success = on_success.clone();
            let api_client = api_client.clone();

            spawn_local(async move {
                let result = match editing {
                    Some(id) => api_client.update_social_server(id, &request).await,
                    None => api_client.create_social_server(&request).await,
                };
                is_submitting.set(false);
                match result {
                    Ok(server) => {
                        info!("Saved social server {} ({})", server.id, server.email);
                        on_success.emit(());
                    }
                    Err(e) => error_message.set(Some(e.to_string())),
                }
            });
        })
    };

    let on_backdrop_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_close.emit(());
        })
    };

    let on_modal_click = Callback::from(|e: MouseEvent| {
        e.stop_propagation();
    });

    let on_cancel = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    if !props.is_open {
        return html! {};
    }

    let disabled = *is_submitting;
    let d = &*draft;

    html! {
        <div class="modal-backdrop" onclick={on_backdrop_click}>
            <div class="modal modal-wide" onclick={on_modal_click}>
                <h3>{if props.server.is_some() { "Editar Servidor Social" } else { "Nuevo Servidor Social" }}</h3>

                {if let Some(error) = (*error_message).clone() {
                    html! { <div class="form-error">{error}</div> }
                } else {
                    html! {}
                }}

                <form onsubmit={on_submit}>
                    <div class="form-row">
                        {text_field("ss-name", "Nombre", "text", &d.name, bind(&draft, |d, v| d.name = v), disabled)}
                        {text_field("ss-email", "Correo", "email", &d.email, bind(&draft, |d, v| d.email = v), disabled)}
                    </div>
                    <div class="form-row">
                        {text_field("ss-school", "Escuela", "text", &d.school, bind(&draft, |d, v| d.school = v), disabled)}
                        {text_field("ss-major", "Carrera", "text", &d.major, bind(&draft, |d, v| d.major = v), disabled)}
                    </div>

                    <div class="form-row">
                        <div class="form-group">
                            <label for="ss-program">{"Programa"}</label>
                            <select id="ss-program" onchange={on_program_change} {disabled}>
                                <option value="" selected={selected_program.is_none()}>{"Seleccione un programa"}</option>
                                {for props.programs.iter().map(|program| html! {
                                    <option
                                        value={program.id.to_string()}
                                        selected={selected_program.map(|p| p.id) == Some(program.id)}
                                    >
                                        {program.name.clone()}
                                    </option>
                                })}
                            </select>
                        </div>
                        <div class="form-group">
                            <label for="ss-park">{"Parque"}</label>
                            <select id="ss-park" onchange={on_park_change} disabled={disabled || selected_program.is_none()}>
                                <option value="" selected={d.park_id.is_none()}>{"Seleccione un parque"}</option>
                                {for selected_program.iter().flat_map(|p| p.parks.iter()).map(|park| html! {
                                    <option value={park.id.to_string()} selected={d.park_id == Some(park.id)}>
                                        {park.park_name.clone()}
                                    </option>
                                })}
                            </select>
                        </div>
                        <div class="form-group">
                            <label for="ss-schedule">{"Horario"}</label>
                            <select id="ss-schedule" onchange={on_schedule_change} disabled={disabled || schedules.is_empty()}>
                                <option value="" selected={d.schedule_id.is_none()}>{"Seleccione un horario"}</option>
                                {for schedules.iter().map(|schedule| html! {
                                    <option
                                        value={schedule.id.to_string()}
                                        selected={d.schedule_id == Some(schedule.id)}
                                        disabled={!schedule.has_vacancy() && d.schedule_id != Some(schedule.id)}
                                    >
                                        {schedule_option_label(schedule)}
                                    </option>
                                })}
                            </select>
                        </div>
                    </div>

                    <div class="form-row">
                        <div class="form-group">
                            <label for="ss-type">{"Tipo"}</label>
                            <select id="ss-type" onchange={on_type_change} {disabled}>
                                {for SOCIAL_SERVER_TYPES.iter().map(|value| html! {
                                    <option value={*value} selected={d.social_server_type == *value}>
                                        {social_server_type_label(value)}
                                    </option>
                                })}
                            </select>
                        </div>
                        {text_field("ss-hours", "Horas requeridas", "number", &d.total_hours, bind(&draft, |d, v| d.total_hours = v), disabled)}
                        {text_field("ss-vest", "Chaleco", "number", &d.vest, bind(&draft, |d, v| d.vest = v), disabled)}
                        <div class="form-group">
                            <label class="checkbox">
                                <input type="checkbox" checked={d.badge} onchange={on_badge_change} {disabled} />
                                {"Gafete"}
                            </label>
                        </div>
                    </div>

                    <div class="form-row">
                        {text_field("ss-birth", "Fecha de nacimiento", "date", &d.birth_date, bind(&draft, |d, v| d.birth_date = v), disabled)}
                        {text_field("ss-start", "Fecha de inicio", "date", &d.start_date, bind(&draft, |d, v| d.start_date = v), disabled)}
                        {text_field("ss-end", "Fecha de término", "date", &d.end_date, bind(&draft, |d, v| d.end_date = v), disabled)}
                    </div>

                    <div class="form-row">
                        {text_field("ss-phone", "Celular", "tel", &d.cell_phone, bind(&draft, |d, v| d.cell_phone = v), disabled)}
                        {text_field("ss-blood", "Tipo de sangre", "text", &d.blood_type, bind(&draft, |d, v| d.blood_type = v), disabled)}
                        {text_field("ss-allergy", "Alergias", "text", &d.allergy, bind(&draft, |d, v| d.allergy = v), disabled)}
                    </div>

                    <div class="form-row">
                        {text_field("ss-tutor", "Tutor", "text", &d.tutor_name, bind(&draft, |d, v| d.tutor_name = v), disabled)}
                        {text_field("ss-tutor-phone", "Teléfono del tutor", "tel", &d.tutor_phone, bind(&draft, |d, v| d.tutor_phone = v), disabled)}
                        {text_field("ss-status", "Estatus", "text", &d.status, bind(&draft, |d, v| d.status = v), disabled)}
                    </div>

                    <div class="modal-buttons">
                        <button type="submit" class="btn btn-primary" {disabled}>
                            {if disabled { "Guardando..." } else { "Guardar" }}
                        </button>
                        <button type="button" class="btn btn-secondary" onclick={on_cancel} {disabled}>
                            {"Cancelar"}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule(capacity: u32, occupied: u32) -> Schedule {
        Schedule {
            id: 4,
            park_ids: vec![1],
            days: "Lunes, Martes, Miércoles, Jueves, Viernes".to_string(),
            start_time: "08:00:00".to_string(),
            end_time: "12:30:00".to_string(),
            capacity: Some(capacity),
            current_capacity: Some(occupied),
            career: Some("Biología".to_string()),
            notes: None,
        }
    }

    #[test]
    fn test_schedule_option_label() {
        assert_eq!(
            schedule_option_label(&schedule(5, 2)),
            "Lunes a Viernes 08:00 - 12:30 (2/5) · Biología"
        );
    }

    #[test]
    fn test_schedule_option_label_marks_full() {
        assert!(schedule_option_label(&schedule(3, 3)).ends_with(" · lleno"));
    }

    #[test]
    fn test_type_label_falls_back_to_raw_value() {
        assert_eq!(social_server_type_label("VOLUNTARIADO"), "Voluntariado");
        assert_eq!(social_server_type_label("OTRO"), "OTRO");
    }
}
