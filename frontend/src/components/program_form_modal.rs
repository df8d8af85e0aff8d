use yew::prelude::*;
use web_sys::{HtmlInputElement, MouseEvent};
use wasm_bindgen_futures::spawn_local;
use log::info;
use shared::forms::ProgramDraft;
use shared::{Park, Program};
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct ProgramFormModalProps {
    pub is_open: bool,
    /// Program being edited; `None` creates a new one
    pub program: Option<Program>,
    pub parks: Vec<Park>,
    pub api_client: ApiClient,
    pub on_success: Callback<()>,
    pub on_close: Callback<()>,
}

#[function_component(ProgramFormModal)]
pub fn program_form_modal(props: &ProgramFormModalProps) -> Html {
    let draft = use_state(ProgramDraft::default);
    let is_submitting = use_state(|| false);
    let error_message = use_state(|| Option::<String>::None);

    use_effect_with((props.is_open, props.program.clone()), {
        let draft = draft.clone();
        let is_submitting = is_submitting.clone();
        let error_message = error_message.clone();
        move |(is_open, program)| {
            if *is_open {
                draft.set(program.as_ref().map(ProgramDraft::from_program).unwrap_or_default());
                is_submitting.set(false);
                error_message.set(None);
            }
            || ()
        }
    });

    let on_name_change = {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            draft.set(ProgramDraft {
                name: input.value(),
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
        let editing = props.program.as_ref().map(|p| p.id);

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
                    Some(id) => api_client.update_program(id, &request).await,
                    None => api_client.create_program(&request).await,
                };
                is_submitting.set(false);
                match result {
                    Ok(program) => {
                        info!("Saved program {} ({})", program.id, program.name);
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

    html! {
        <div class="modal-backdrop" onclick={on_backdrop_click}>
            <div class="modal" onclick={on_modal_click}>
                <h3>{if props.program.is_some() { "Editar Programa" } else { "Nuevo Programa" }}</h3>

                {if let Some(error) = (*error_message).clone() {
                    html! { <div class="form-error">{error}</div> }
                } else {
                    html! {}
                }}

                <form onsubmit={on_submit}>
                    <div class="form-group">
                        <label for="program-name">{"Nombre"}</label>
                        <input
                            id="program-name"
                            type="text"
                            value={draft.name.clone()}
                            onchange={on_name_change}
                            disabled={*is_submitting}
                            autofocus={true}
                        />
                    </div>

                    <div class="form-group">
                        <label>{"Parques"}</label>
                        {if props.parks.is_empty() {
                            html! { <p class="hint">{"Primero registre al menos un parque."}</p> }
                        } else {
                            html! {
                                <div class="checkbox-list">
                                    {for props.parks.iter().map(|park| {
                                        let park_id = park.id;
                                        let onchange = {
                                            let draft = draft.clone();
                                            Callback::from(move |_: Event| {
                                                let mut next = (*draft).clone();
                                                next.toggle_park(park_id);
                                                draft.set(next);
                                            })
                                        };
                                        html! {
                                            <label class="checkbox" key={park.id}>
                                                <input
                                                    type="checkbox"
                                                    checked={draft.park_ids.contains(&park.id)}
                                                    disabled={*is_submitting}
                                                    {onchange}
                                                />
                                                {format!("{} ({})", park.park_name, park.abbreviation)}
                                            </label>
                                        }
                                    })}
                                </div>
                            }
                        }}
                    </div>

                    <div class="modal-buttons">
                        <button type="submit" class="btn btn-primary" disabled={*is_submitting}>
                            {if *is_submitting { "Guardando..." } else { "Guardar" }}
                        </button>
                        <button type="button" class="btn btn-secondary" onclick={on_cancel} disabled={*is_submitting}>
                            {"Cancelar"}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
