use yew::prelude::*;
use shared::{Park, Program};
use wasm_bindgen_futures::spawn_local;
use log::error;
use crate::services::api::{ApiClient, ApiError};

#[derive(Clone, PartialEq)]
pub struct ProgramsState {
    pub programs: Vec<Program>,
    pub parks: Vec<Park>,
    pub loading: bool,
    pub error: Option<String>,
}

pub struct UseProgramsResult {
    pub state: ProgramsState,
    pub actions: UseProgramsActions,
}

#[derive(Clone, PartialEq)]
pub struct UseProgramsActions {
    pub refresh: Callback<()>,
}

/// Both lists from one refresh, or the message to show when either request failed
fn catalogue(
    programs: Result<Vec<Program>, ApiError>,
    parks: Result<Vec<Park>, ApiError>,
) -> Result<(Vec<Program>, Vec<Park>), String> {
    match (programs, parks) {
        (Ok(programs), Ok(parks)) => Ok((programs, parks)),
        (Err(e), _) | (_, Err(e)) => Err(format!("Error al cargar los programas: {}", e)),
    }
}

/// Programs with their nested parks and schedules, plus the park catalogue.
/// Every mutation on the programs page ends with `refresh`, so what the
/// capacity validator sees is whatever the last fetch returned. A failed
/// refresh keeps the previous lists on screen.
#[hook]
pub fn use_programs(api_client: &ApiClient) -> UseProgramsResult {
    let programs = use_state(Vec::<Program>::new);
    let parks = use_state(Vec::<Park>::new);
    let loading = use_state(|| true);
    let load_error = use_state(|| None::<String>);

    let refresh = {
        let api_client = api_client.clone();
        let programs = programs.clone();
        let parks = parks.clone();
        let loading = loading.clone();
        let load_error = load_error.clone();

        use_callback((), move |_, _| {
            let api_client = api_client.clone();
            let programs = programs.clone();
            let parks = parks.clone();
            let loading = loading.clone();
            let load_error = load_error.clone();

            spawn_local(async move {
                loading.set(true);

                let fetched_programs = api_client.get_programs().await;
                let fetched_parks = api_client.get_parks().await;

                match catalogue(fetched_programs, fetched_parks) {
                    Ok((fresh_programs, fresh_parks)) => {
                        programs.set(fresh_programs);
                        parks.set(fresh_parks);
                        load_error.set(None);
                    }
                    Err(message) => {
                        error!("{}", message);
                        load_error.set(Some(message));
                    }
                }
                loading.set(false);
            });
        })
    };

    use_effect_with((), {
        let refresh = refresh.clone();
        move |_| {
            refresh.emit(());
            || ()
        }
    });

    UseProgramsResult {
        state: ProgramsState {
            programs: (*programs).clone(),
            parks: (*parks).clone(),
            loading: *loading,
            error: (*load_error).clone(),
        },
        actions: UseProgramsActions { refresh },
    }
}
