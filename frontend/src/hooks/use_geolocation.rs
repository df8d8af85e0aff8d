use yew::prelude::*;
use js_sys::Reflect;
use log::{debug, warn};
use shared::GeoPoint;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen::closure::Closure;

#[derive(Clone, Debug, PartialEq)]
pub enum GeoStatus {
    Locating,
    Located(GeoPoint),
    Unavailable(String),
}

impl GeoStatus {
    pub fn location(&self) -> Option<GeoPoint> {
        match self {
            GeoStatus::Located(point) => Some(*point),
            _ => None,
        }
    }
}

fn number(target: &JsValue, field: &str) -> Option<f64> {
    Reflect::get(target, &JsValue::from_str(field)).ok()?.as_f64()
}

/// Pull latitude/longitude out of a `GeolocationPosition`
fn read_position(position: &JsValue) -> Option<GeoPoint> {
    let coords = Reflect::get(position, &JsValue::from_str("coords")).ok()?;
    Some(GeoPoint {
        latitude: number(&coords, "latitude")?,
        longitude: number(&coords, "longitude")?,
    })
}

fn read_error(error: &JsValue) -> String {
    Reflect::get(error, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| "No se pudo obtener la ubicación".to_string())
}

fn request_position(status: UseStateHandle<GeoStatus>) {
    let geolocation = web_sys::window()
        .map(|w| w.navigator())
        .and_then(|n| n.geolocation().ok());

    let Some(geolocation) = geolocation else {
        status.set(GeoStatus::Unavailable(
            "El navegador no permite obtener la ubicación".to_string(),
        ));
        return;
    };

    status.set(GeoStatus::Locating);

    let on_success = {
        let status = status.clone();
        Closure::once_into_js(move |position: JsValue| match read_position(&position) {
            Some(point) => {
                debug!("Location acquired: {}, {}", point.latitude, point.longitude);
                status.set(GeoStatus::Located(point));
            }
            None => status.set(GeoStatus::Unavailable("Ubicación inválida".to_string())),
        })
    };
    let on_error = {
        let status = status.clone();
        Closure::once_into_js(move |error: JsValue| {
            let message = read_error(&error);
            warn!("Geolocation failed: {}", message);
            status.set(GeoStatus::Unavailable(message));
        })
    };

    if let Err(e) = geolocation.get_current_position_with_error_callback(
        on_success.unchecked_ref(),
        Some(on_error.unchecked_ref()),
    ) {
        warn!("Geolocation request rejected: {:?}", e);
        status.set(GeoStatus::Unavailable(read_error(&e)));
    }
}

pub struct UseGeolocationResult {
    pub status: GeoStatus,
    pub retry: Callback<()>,
}

/// Ask for the device position once on mount; `retry` asks again.
#[hook]
pub fn use_geolocation() -> UseGeolocationResult {
    let status = use_state(|| GeoStatus::Locating);

    let retry = {
        let status = status.clone();
        use_callback((), move |_: (), _| request_position(status.clone()))
    };

    use_effect_with((), {
        let retry = retry.clone();
        move |_| {
            retry.emit(());
            || ()
        }
    });

    UseGeolocationResult {
        status: (*status).clone(),
        retry,
    }
}
