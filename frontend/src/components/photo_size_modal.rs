use yew::prelude::*;
use web_sys::{HtmlInputElement, MouseEvent};
use wasm_bindgen_futures::spawn_local;
use log::info;
use shared::PhotoSizeLimit;
use crate::services::api::ApiClient;

/// Parse the limit typed by the operator, in KB
fn parse_limit(raw: &str) -> Option<PhotoSizeLimit> {
    match raw.trim().parse::<u32>() {
        Ok(value) if value > 0 => Some(PhotoSizeLimit { value }),
        _ => None,
    }
}

#[derive(Properties, PartialEq)]
pub struct PhotoSizeModalProps {
    pub is_open: bool,
    pub api_client: ApiClient,
    pub on_close: Callback<()>,
}

#[function_component(PhotoSizeModal)]
pub fn photo_size_modal(props: &PhotoSizeModalProps) -> Html {
    let value = use_state(String::new);
    let is_loading = use_state(|| false);
    let is_submitting = use_state(|| false);
    let error_message = use_state(|| Option::<String>::None);
    let success_message = use_state(|| Option::<String>::None);

    use_effect_with(props.is_open, {
        let value = value.clone();
        let is_loading = is_loading.clone();
        let error_message = error_message.clone();
        let success_message = success_message.clone();
        let api_client = props.api_client.clone();
        move |is_open| {
            if *is_open {
                error_message.set(None);
                success_message.set(None);
                is_loading.set(true);
                spawn_local(async move {
                    match api_client.get_photo_size_limit().await {
                        Ok(limit) => value.set(limit.value.to_string()),
                        Err(e) => error_message.set(Some(format!("Error al cargar la configuración: {}", e))),
                    }
                    is_loading.set(false);
                });
            }
            || ()
        }
    });

    let on_input = {
        let value = value.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            value.set(input.value());
        })
    };

    let on_submit = {
        let value = value.clone();
        let is_submitting = is_submitting.clone();
        let error_message = error_message.clone();
        let success_message = success_message.clone();
        let api_client = props.api_client.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let Some(limit) = parse_limit(&value) else {
                error_message.set(Some("El tamaño debe ser un número mayor a 0".to_string()));
                return;
            };

            is_submitting.set(true);
            error_message.set(None);
            success_message.set(None);

            let is_submitting = is_submitting.clone();
            let error_message = error_message.clone();
            let success_message = success_message.clone();
            let api_client = api_client.clone();

            spawn_local(async move {
                match api_client.update_photo_size_limit(limit).await {
                    Ok(()) => {
                        info!("Photo size limit set to {} KB", limit.value);
                        success_message.set(Some("Configuración guardada".to_string()));
                    }
                    Err(e) => error_message.set(Some(e.to_string())),
                }
                is_submitting.set(false);
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

    let disabled = *is_submitting || *is_loading;

    html! {
        <div class="modal-backdrop" onclick={on_backdrop_click}>
            <div class="modal" onclick={on_modal_click}>
                <h3>{"Tamaño máximo de fotografía"}</h3>

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

                <form onsubmit={on_submit}>
                    <div class="form-group">
                        <label for="photo-size">{"Tamaño (KB)"}</label>
                        <input
                            id="photo-size"
                            type="number"
                            min="1"
                            value={(*value).clone()}
                            oninput={on_input}
                            {disabled}
                        />
                    </div>
                    <div class="modal-buttons">
                        <button type="submit" class="btn btn-primary" {disabled}>
                            {if *is_submitting { "Guardando..." } else { "Guardar" }}
                        </button>
                        <button type="button" class="btn btn-secondary" onclick={on_cancel}>
                            {"Cerrar"}
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

    #[test]
    fn test_parse_limit() {
        assert_eq!(parse_limit(" 512 "), Some(PhotoSizeLimit { value: 512 }));
        assert_eq!(parse_limit("0"), None);
        assert_eq!(parse_limit("-5"), None);
        assert_eq!(parse_limit("grande"), None);
    }
}
