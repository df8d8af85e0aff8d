use yew::prelude::*;
use web_sys::MouseEvent;
use wasm_bindgen_futures::spawn_local;
use gloo::dialogs::confirm;
use log::info;
use shared::time::short_time;
use shared::{days_label, Program, ProgramScheduleView, Schedule, ScheduleGroup};
use super::program_form_modal::ProgramFormModal;
use super::schedule_form_modal::ScheduleFormModal;
use crate::hooks::use_programs::use_programs;
use crate::services::api::ApiClient;

/// Message shown after a delete, naming the social servers it detached
pub fn affected_notice(subject: &str, affected: &[String]) -> String {
    if affected.is_empty() {
        format!("{} eliminado correctamente.", subject)
    } else {
        format!(
            "{} eliminado. Servidores sociales afectados ({}): {}",
            subject,
            affected.len(),
            affected.join(", ")
        )
    }
}

#[derive(Clone, PartialEq)]
enum ScheduleModal {
    Closed,
    Open { program: Program, schedule: Option<Schedule> },
}

#[derive(Properties, PartialEq)]
pub struct ProgramManagementProps {
    pub api_client: ApiClient,
}

#[function_component(ProgramManagement)]
pub fn program_management(props: &ProgramManagementProps) -> Html {
    let programs = use_programs(&props.api_client);
    let show_program_modal = use_state(|| false);
    let editing_program = use_state(|| Option::<Program>::None);
    let schedule_modal = use_state(|| ScheduleModal::Closed);
    let notice = use_state(|| Option::<String>::None);
    let error_message = use_state(|| Option::<String>::None);

    let refresh = programs.actions.refresh.clone();

    let open_create_program = {
        let show_program_modal = show_program_modal.clone();
        let editing_program = editing_program.clone();
        Callback::from(move |_: MouseEvent| {
            editing_program.set(None);
            show_program_modal.set(true);
        })
    };

    let close_program_modal = {
        let show_program_modal = show_program_modal.clone();
        Callback::from(move |_| show_program_modal.set(false))
    };

    let on_program_saved = {
        let show_program_modal = show_program_modal.clone();
        let refresh = refresh.clone();
        Callback::from(move |_| {
            show_program_modal.set(false);
            refresh.emit(());
        })
    };

    let close_schedule_modal = {
        let schedule_modal = schedule_modal.clone();
        Callback::from(move |_| schedule_modal.set(ScheduleModal::Closed))
    };

    let on_schedule_saved = {
        let schedule_modal = schedule_modal.clone();
        let refresh = refresh.clone();
        Callback::from(move |_| {
            schedule_modal.set(ScheduleModal::Closed);
            refresh.emit(());
        })
    };

    let delete_program = {
        let api_client = props.api_client.clone();
        let notice = notice.clone();
        let error_message = error_message.clone();
        let refresh = refresh.clone();
        Callback::from(move |program: Program| {
            if !confirm(&format!(
                "¿Eliminar el programa \"{}\"? Sus horarios también se eliminarán.",
                program.name
            )) {
                return;
            }
            let api_client = api_client.clone();
            let notice = notice.clone();
            let error_message = error_message.clone();
            let refresh = refresh.clone();
            spawn_local(async move {
                match api_client.delete_program(program.id).await {
                    Ok(affected) => {
                        info!("Deleted program {}, {} social servers affected", program.id, affected.len());
                        error_message.set(None);
                        notice.set(Some(affected_notice("Programa", &affected)));
                        refresh.emit(());
                    }
                    Err(e) => error_message.set(Some(e.to_string())),
                }
            });
        })
    };

    let delete_schedule = {
        let api_client = props.api_client.clone();
        let notice = notice.clone();
        let error_message = error_message.clone();
        let refresh = refresh.clone();
        Callback::from(move |(program_id, schedule): (i64, Schedule)| {
            if !confirm(&format!(
                "¿Eliminar el horario {} {} - {}?",
                days_label(&schedule.days),
                short_time(&schedule.start_time),
                short_time(&schedule.end_time)
            )) {
                return;
            }
            let api_client = api_client.clone();
            let notice = notice.clone();
            let error_message = error_message.clone();
            let refresh = refresh.clone();
            spawn_local(async move {
                match api_client.delete_schedule(program_id, schedule.id).await {
                    Ok(affected) => {
                        info!("Deleted schedule {}, {} social servers affected", schedule.id, affected.len());
                        error_message.set(None);
                        notice.set(Some(affected_notice("Horario", &affected)));
                        refresh.emit(());
                    }
                    Err(e) => error_message.set(Some(e.to_string())),
                }
            });
        })
    };

    let dismiss_notice = {
        let notice = notice.clone();
        Callback::from(move |_: MouseEvent| notice.set(None))
    };

    let state = &programs.state;
    let load_error = state.error.clone().or_else(|| (*error_message).clone());

    html! {
        <div class="program-management">
            <div class="page-header">
                <h2>{"Gestión de Programas"}</h2>
                <button class="btn btn-primary" onclick={open_create_program}>{"Nuevo Programa"}</button>
            </div>

            {if let Some(error) = load_error {
                html! { <div class="form-error">{error}</div> }
            } else {
                html! {}
            }}

            {if let Some(message) = (*notice).clone() {
                html! {
                    <div class="notice">
                        <span>{message}</span>
                        <button class="btn btn-link" onclick={dismiss_notice}>{"×"}</button>
                    </div>
                }
            } else {
                html! {}
            }}

            {if state.loading && state.programs.is_empty() {
                html! { <div class="loading">{"Cargando..."}</div> }
            } else if state.programs.is_empty() {
                html! { <p class="empty">{"No hay programas registrados."}</p> }
            } else {
                html! {
                    <div class="programs-list">
                        {for state.programs.iter().map(|program| {
                            let on_edit = {
                                let program = program.clone();
                                let editing_program = editing_program.clone();
                                let show_program_modal = show_program_modal.clone();
                                Callback::from(move |_: MouseEvent| {
                                    editing_program.set(Some(program.clone()));
                                    show_program_modal.set(true);
                                })
                            };
                            let on_delete = {
                                let program = program.clone();
                                delete_program.reform(move |_: MouseEvent| program.clone())
                            };
                            let on_add_schedule = {
                                let program = program.clone();
                                let schedule_modal = schedule_modal.clone();
                                Callback::from(move |_: MouseEvent| {
                                    schedule_modal.set(ScheduleModal::Open { program: program.clone(), schedule: None });
                                })
                            };
                            let on_edit_schedule = {
                                let program = program.clone();
                                let schedule_modal = schedule_modal.clone();
                                Callback::from(move |schedule: Schedule| {
                                    schedule_modal.set(ScheduleModal::Open { program: program.clone(), schedule: Some(schedule) });
                                })
                            };
                            let on_delete_schedule = {
                                let program_id = program.id;
                                delete_schedule.reform(move |schedule: Schedule| (program_id, schedule))
                            };
                            html! {
                                <ProgramCard
                                    key={program.id}
                                    program={program.clone()}
                                    {on_edit}
                                    {on_delete}
                                    {on_add_schedule}
                                    {on_edit_schedule}
                                    {on_delete_schedule}
                                />
                            }
                        })}
                    </div>
                }
            }}

            <ProgramFormModal
                is_open={*show_program_modal}
                program={(*editing_program).clone()}
                parks={state.parks.clone()}
                api_client={props.api_client.clone()}
                on_success={on_program_saved}
                on_close={close_program_modal}
            />

            {match (*schedule_modal).clone() {
                ScheduleModal::Open { program, schedule } => html! {
                    <ScheduleFormModal
                        is_open={true}
                        {program}
                        {schedule}
                        api_client={props.api_client.clone()}
                        on_success={on_schedule_saved}
                        on_close={close_schedule_modal}
                    />
                },
                ScheduleModal::Closed => html! {},
            }}
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ProgramCardProps {
    program: Program,
    on_edit: Callback<MouseEvent>,
    on_delete: Callback<MouseEvent>,
    on_add_schedule: Callback<MouseEvent>,
    on_edit_schedule: Callback<Schedule>,
    on_delete_schedule: Callback<Schedule>,
}

#[function_component(ProgramCard)]
fn program_card(props: &ProgramCardProps) -> Html {
    let program = &props.program;
    let view = use_memo(program.clone(), ProgramScheduleView::build);

    html! {
        <div class="program-card">
            <div class="program-header">
                <div>
                    <h3>{program.name.clone()}</h3>
                    <div class="park-badges">
                        {for program.parks.iter().map(|park| html! {
                            <span class="park-badge" key={park.id}>{park.park_name.clone()}</span>
                        })}
                    </div>
                </div>
                <div class="program-actions">
                    <span class="capacity-badge" title="Ocupación / capacidad total">
                        {format!("{}/{}", program.occupied(), program.capacity_limit())}
                    </span>
                    <button class="btn btn-soft" onclick={props.on_edit.clone()}>{"Editar"}</button>
                    <button class="btn btn-danger" onclick={props.on_delete.clone()}>{"Eliminar"}</button>
                </div>
            </div>

            <div class="schedules-section">
                <h4>{"Horarios"}</h4>
                {if view.is_empty() {
                    html! { <p class="no-schedules">{"No hay horarios configurados"}</p> }
                } else {
                    html! {
                        <>
                        {for view.groups.iter().map(|group| html! {
                            <ScheduleGroupView
                                key={group.key.to_string()}
                                title={group.title(program)}
                                group={group.clone()}
                                on_edit={props.on_edit_schedule.clone()}
                                on_delete={props.on_delete_schedule.clone()}
                            />
                        })}
                        </>
                    }
                }}

                {if view.parks_without_schedules.is_empty() {
                    html! {}
                } else {
                    html! {
                        <p class="parks-without-schedules">
                            {"Parques sin horarios: "}
                            {view.parks_without_schedules
                                .iter()
                                .map(|p| p.park_name.as_str())
                                .collect::<Vec<_>>()
                                .join(", ")}
                        </p>
                    }
                }}

                <button class="btn btn-sm btn-secondary" onclick={props.on_add_schedule.clone()}>
                    {"Agregar Horario"}
                </button>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ScheduleGroupViewProps {
    title: String,
    group: ScheduleGroup,
    on_edit: Callback<Schedule>,
    on_delete: Callback<Schedule>,
}

#[function_component(ScheduleGroupView)]
fn schedule_group_view(props: &ScheduleGroupViewProps) -> Html {
    html! {
        <div class="schedule-group">
            <h5>
                {props.title.clone()}
                <span class="group-capacity">{format!(" · capacidad {}", props.group.total_capacity())}</span>
            </h5>
            <ul>
                {for props.group.schedules.iter().map(|schedule| {
                    let on_edit = {
                        let schedule = schedule.clone();
                        props.on_edit.reform(move |_: MouseEvent| schedule.clone())
                    };
                    let on_delete = {
                        let schedule = schedule.clone();
                        props.on_delete.reform(move |_: MouseEvent| schedule.clone())
                    };
                    html! {
                        <li class="schedule-item" key={schedule.id}>
                            <span>
                                {format!(
                                    "{}: {} - {}",
                                    days_label(&schedule.days),
                                    short_time(&schedule.start_time),
                                    short_time(&schedule.end_time)
                                )}
                                <span class={classes!("schedule-capacity", (!schedule.has_vacancy()).then_some("full"))}>
                                    {format!(" (Cap: {}/{})", schedule.occupied(), schedule.capacity_or_zero())}
                                </span>
                                {for schedule.career.as_ref().map(|career| html! {
                                    <span class="schedule-career">{format!(" · {}", career)}</span>
                                })}
                                {for schedule.notes.as_ref().map(|notes| html! {
                                    <span class="schedule-notes" title={notes.clone()}>{" 📝"}</span>
                                })}
                            </span>
                            <span class="schedule-actions">
                                <button class="btn btn-soft" onclick={on_edit}>{"Editar"}</button>
                                <button class="btn btn-danger" onclick={on_delete}>{"Eliminar"}</button>
                            </span>
                        </li>
                    }
                })}
            </ul>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_affected_notice_without_servers() {
        assert_eq!(affected_notice("Horario", &[]), "Horario eliminado correctamente.");
    }

    #[test]
    fn test_affected_notice_lists_servers() {
        let affected = vec!["Ana López".to_string(), "Luis Pérez".to_string()];
        assert_eq!(
            affected_notice("Programa", &affected),
            "Programa eliminado. Servidores sociales afectados (2): Ana López, Luis Pérez"
        );
    }
}
