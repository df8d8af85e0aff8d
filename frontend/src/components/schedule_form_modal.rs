use yew::prelude::*;
use web_sys::{HtmlInputElement, HtmlTextAreaElement, MouseEvent};
use wasm_bindgen_futures::spawn_local;
use log::{debug, info};
use shared::capacity::committed_capacity;
use shared::forms::ScheduleDraft;
use shared::{Program, Schedule};
use super::day_selector::DaySelector;
use super::time_picker::TimePicker;
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct ScheduleFormModalProps {
    pub is_open: bool,
    /// Owning program, as last fetched
    pub program: Program,
    /// Schedule being edited; `None` creates a new one
    pub schedule: Option<Schedule>,
    pub api_client: ApiClient,
    pub on_success: Callback<()>,
    pub on_close: Callback<()>,
}

/// Capacity still unassigned in the program, ignoring the edited schedule
fn remaining_capacity(program: &Program, editing: Option<i64>) -> i64 {
    i64::from(program.capacity_limit()) - committed_capacity(program, editing) as i64
}

fn update(draft: &UseStateHandle<ScheduleDraft>, apply: impl Fn(&mut ScheduleDraft)) {
    let mut next = (**draft).clone();
    apply(&mut next);
    draft.set(next);
}

#[function_component(ScheduleFormModal)]
pub fn schedule_form_modal(props: &ScheduleFormModalProps) -> Html {
    let draft = use_state(ScheduleDraft::default);
    let is_submitting = use_state(|| false);
    let error_message = use_state(|| Option::<String>::None);
    let editing = props.schedule.as_ref().map(|s| s.id);

    use_effect_with((props.is_open, props.schedule.clone()), {
        let draft = draft.clone();
        let is_submitting = is_submitting.clone();
        let error_message = error_message.clone();
        move |(is_open, schedule)| {
            if *is_open {
                draft.set(schedule.as_ref().map(ScheduleDraft::from_schedule).unwrap_or_default());
                is_submitting.set(false);
                error_message.set(None);
            }
            || ()
        }
    });

    let on_days_change = {
        let draft = draft.clone();
        Callback::from(move |days: String| update(&draft, |d| d.days = days.clone()))
    };
    let on_start_change = {
        let draft = draft.clone();
        Callback::from(move |time: String| update(&draft, |d| d.start_time = time.clone()))
    };
    let on_end_change = {
        let draft = draft.clone();
        Callback::from(move |time: String| update(&draft, |d| d.end_time = time.clone()))
    };
    let on_capacity_input = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            update(&draft, |d| d.capacity = input.value());
        })
    };
    let on_career_change = {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            update(&draft, |d| d.career = input.value());
        })
    };
    let on_notes_change = {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            update(&draft, |d| d.notes = input.value());
        })
    };

    let on_submit = {
        let draft = draft.clone();
        let is_submitting = is_submitting.clone();
        let error_message = error_message.clone();
        let on_success = props.on_success.clone();
        let api_client = props.api_client.clone();
        let program = props.program.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            // Checked against the program snapshot this page last fetched
            let request = match draft.validate(&program, editing) {
                Ok(request) => request,
                Err(e) => {
                    debug!("Schedule draft rejected: {}", e);
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
            let program_id = program.id;

            spawn_local(async move {
                let result = match editing {
                    Some(schedule_id) => api_client.update_schedule(program_id, schedule_id, &request).await,
                    None => api_client.create_schedule(program_id, &request).await,
                };
                is_submitting.set(false);
                match result {
                    Ok(schedule) => {
                        info!("Saved schedule {} in program {}", schedule.id, program_id);
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

    let remaining = remaining_capacity(&props.program, editing);
    let disabled = *is_submitting;

    html! {
        <div class="modal-backdrop" onclick={on_backdrop_click}>
            <div class="modal modal-wide" onclick={on_modal_click}>
                <h3>
                    {if editing.is_some() { "Editar Horario" } else { "Nuevo Horario" }}
                    <span class="modal-subtitle">{format!(" · {}", props.program.name)}</span>
                </h3>

                {if let Some(error) = (*error_message).clone() {
                    html! { <div class="form-error">{error}</div> }
                } else {
                    html! {}
                }}

                <form onsubmit={on_submit}>
                    <div class="form-group">
                        <label>{"Parques"}</label>
                        <div class="checkbox-list">
                            {for props.program.parks.iter().map(|park| {
                                let park_id = park.id;
                                let onchange = {
                                    let draft = draft.clone();
                                    Callback::from(move |_: Event| update(&draft, |d| d.toggle_park(park_id)))
                                };
                                html! {
                                    <label class="checkbox" key={park.id}>
                                        <input
                                            type="checkbox"
                                            checked={draft.park_ids.contains(&park.id)}
                                            {disabled}
                                            {onchange}
                                        />
                                        {park.park_name.clone()}
                                    </label>
                                }
                            })}
                        </div>
                    </div>

                    <div class="form-group">
                        <label>{"Días"}</label>
                        <DaySelector days={draft.days.clone()} on_change={on_days_change} {disabled} />
                    </div>

                    <div class="form-row">
                        <TimePicker
                            id="schedule-start"
                            label="Hora de inicio"
                            value={draft.start_time.clone()}
                            on_change={on_start_change}
                            {disabled}
                        />
                        <TimePicker
                            id="schedule-end"
                            label="Hora de fin"
                            value={draft.end_time.clone()}
                            on_change={on_end_change}
                            {disabled}
                        />
                    </div>

                    <div class="form-group">
                        <label for="schedule-capacity">{"Capacidad"}</label>
                        <input
                            id="schedule-capacity"
                            type="number"
                            min="1"
                            value={draft.capacity.clone()}
                            oninput={on_capacity_input}
                            {disabled}
                        />
                        <small class="hint">
                            {format!(
                                "Disponible en el programa: {} de {}",
                                remaining.max(0),
                                props.program.capacity_limit()
                            )}
                        </small>
                    </div>

                    <div class="form-group">
                        <label for="schedule-career">{"Carrera (opcional)"}</label>
                        <input
                            id="schedule-career"
                            type="text"
                            value={draft.career.clone()}
                            onchange={on_career_change}
                            {disabled}
                        />
                    </div>

                    <div class="form-group">
                        <label for="schedule-notes">{"Notas (opcional)"}</label>
                        <textarea
                            id="schedule-notes"
                            value={draft.notes.clone()}
                            onchange={on_notes_change}
                            {disabled}
                        />
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
