use yew::prelude::*;
use web_sys::{HtmlInputElement, MouseEvent};
use wasm_bindgen_futures::spawn_local;
use gloo::dialogs::confirm;
use log::{error, info};
use shared::forms::ParkDraft;
use shared::Park;
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct ParkManagementProps {
    pub api_client: ApiClient,
}

#[function_component(ParkManagement)]
pub fn park_management(props: &ParkManagementProps) -> Html {
    let parks = use_state(Vec::<Park>::new);
    let loading = use_state(|| true);
    let reload = use_state(|| 0u32);
    let error_message = use_state(|| Option::<String>::None);

    // None: form hidden, Some(None): creating, Some(Some(id)): editing
    let form_target = use_state(|| Option::<Option<i64>>::None);
    let draft = use_state(ParkDraft::default);
    let is_submitting = use_state(|| false);

    use_effect_with(*reload, {
        let parks = parks.clone();
        let loading = loading.clone();
        let error_message = error_message.clone();
        let api_client = props.api_client.clone();
        move |_| {
            spawn_local(async move {
                loading.set(true);
                match api_client.get_parks().await {
                    Ok(list) => parks.set(list),
                    Err(e) => {
                        error!("Failed to load parks: {}", e);
                        error_message.set(Some(format!("Error al cargar los parques: {}", e)));
                    }
                }
                loading.set(false);
            });
            || ()
        }
    });

    let open_create = {
        let form_target = form_target.clone();
        let draft = draft.clone();
        let error_message = error_message.clone();
        Callback::from(move |_: MouseEvent| {
            draft.set(ParkDraft::default());
            error_message.set(None);
            form_target.set(Some(None));
        })
    };

    let close_form = {
        let form_target = form_target.clone();
        Callback::from(move |_: MouseEvent| form_target.set(None))
    };

    let on_name_change = {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            draft.set(ParkDraft {
                park_name: input.value(),
                ..(*draft).clone()
            });
        })
    };

    let on_abbreviation_change = {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            draft.set(ParkDraft {
                abbreviation: input.value(),
                ..(*draft).clone()
            });
        })
    };

    let on_submit = {
        let draft = draft.clone();
        let form_target = form_target.clone();
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
            let Some(target) = *form_target else {
                return;
            };

            is_submitting.set(true);
            error_message.set(None);

            let form_target = form_target.clone();
            let is_submitting = is_submitting.clone();
            let error_message = error_message.clone();
            let reload = reload.clone();
            let api_client = api_client.clone();

            spawn_local(async move {
                let result = match target {
                    Some(id) => api_client.update_park(id, &request).await,
                    None => api_client.create_park(&request).await,
                };
                is_submitting.set(false);
                match result {
                    Ok(park) => {
                        info!("Saved park {} ({})", park.id, park.park_name);
                        form_target.set(None);
                        reload.set(*reload + 1);
                    }
                    Err(e) => error_message.set(Some(e.to_string())),
                }
            });
        })
    };

    let on_delete = {
        let api_client = props.api_client.clone();
        let error_message = error_message.clone();
        let reload = reload.clone();
        Callback::from(move |park: Park| {
            if !confirm(&format!("¿Eliminar el parque \"{}\"?", park.park_name)) {
                return;
            }
            let api_client = api_client.clone();
            let error_message = error_message.clone();
            let reload = reload.clone();
            spawn_local(async move {
                match api_client.delete_park(park.id).await {
                    Ok(()) => {
                        info!("Deleted park {}", park.id);
                        reload.set(*reload + 1);
                    }
                    Err(e) => error_message.set(Some(e.to_string())),
                }
            });
        })
    };

    html! {
        <div class="park-management">
            <div class="page-header">
                <h2>{"Parques"}</h2>
                <button class="btn btn-primary" onclick={open_create}>{"Nuevo Parque"}</button>
            </div>

            {if let Some(error) = (*error_message).clone() {
                html! { <div class="form-error">{error}</div> }
            } else {
                html! {}
            }}

            {if let Some(target) = *form_target {
                html! {
                    <form class="inline-form" onsubmit={on_submit}>
                        <h3>{if target.is_some() { "Editar Parque" } else { "Nuevo Parque" }}</h3>
                        <div class="form-row">
                            <div class="form-group">
                                <label for="park-name">{"Nombre"}</label>
                                <input
                                    id="park-name"
                                    type="text"
                                    maxlength="255"
                                    value={draft.park_name.clone()}
                                    onchange={on_name_change}
                                    disabled={*is_submitting}
                                />
                            </div>
                            <div class="form-group">
                                <label for="park-abbreviation">{"Abreviatura"}</label>
                                <input
                                    id="park-abbreviation"
                                    type="text"
                                    maxlength="50"
                                    value={draft.abbreviation.clone()}
                                    onchange={on_abbreviation_change}
                                    disabled={*is_submitting}
                                />
                            </div>
                        </div>
                        <div class="modal-buttons">
                            <button type="submit" class="btn btn-primary" disabled={*is_submitting}>
                                {if *is_submitting { "Guardando..." } else { "Guardar" }}
                            </button>
                            <button type="button" class="btn btn-secondary" onclick={close_form} disabled={*is_submitting}>
                                {"Cancelar"}
                            </button>
                        </div>
                    </form>
                }
            } else {
                html! {}
            }}

            {if *loading && parks.is_empty() {
                html! { <div class="loading">{"Cargando..."}</div> }
            } else if parks.is_empty() {
                html! { <p class="empty">{"No hay parques registrados."}</p> }
            } else {
                html! {
                    <table class="data-table">
                        <thead>
                            <tr>
                                <th>{"Nombre"}</th>
                                <th>{"Abreviatura"}</th>
                                <th>{"Acciones"}</th>
                            </tr>
                        </thead>
                        <tbody>
                            {for parks.iter().map(|park| {
                                let on_edit = {
                                    let park = park.clone();
                                    let draft = draft.clone();
                                    let form_target = form_target.clone();
                                    let error_message = error_message.clone();
                                    Callback::from(move |_: MouseEvent| {
                                        draft.set(ParkDraft {
                                            park_name: park.park_name.clone(),
                                            abbreviation: park.abbreviation.clone(),
                                        });
                                        error_message.set(None);
                                        form_target.set(Some(Some(park.id)));
                                    })
                                };
                                let on_delete = {
                                    let park = park.clone();
                                    on_delete.reform(move |_: MouseEvent| park.clone())
                                };
                                html! {
                                    <tr key={park.id}>
                                        <td>{park.park_name.clone()}</td>
                                        <td>{park.abbreviation.clone()}</td>
                                        <td class="actions">
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
        </div>
    }
}
