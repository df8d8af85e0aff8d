use yew::prelude::*;
use web_sys::MouseEvent;
use shared::days::{toggle_day, DaySelection, Weekday, WEEKDAYS_STRING};

#[derive(Properties, PartialEq)]
pub struct DaySelectorProps {
    /// Stored days string, e.g. "Lunes, Miércoles"
    pub days: String,
    pub on_change: Callback<String>,
    #[prop_or_default]
    pub disabled: bool,
}

/// Weekday toggles. Whatever order days are clicked in, the emitted string is
/// in Monday-to-Sunday order.
#[function_component(DaySelector)]
pub fn day_selector(props: &DaySelectorProps) -> Html {
    let selection = DaySelection::parse(&props.days);

    let weekdays_shortcut = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            on_change.emit(WEEKDAYS_STRING.to_string());
        })
    };

    html! {
        <div class="day-selector">
            <div class="day-selector-days">
                {for Weekday::ALL.iter().map(|day| {
                    let day = *day;
                    let selected = selection.contains(day);
                    let onclick = {
                        let days = props.days.clone();
                        let on_change = props.on_change.clone();
                        Callback::from(move |e: MouseEvent| {
                            e.prevent_default();
                            on_change.emit(toggle_day(&days, day));
                        })
                    };
                    html! {
                        <button
                            type="button"
                            class={classes!("day-toggle", selected.then_some("selected"))}
                            title={day.name()}
                            disabled={props.disabled}
                            {onclick}
                        >
                            {day.short_label()}
                        </button>
                    }
                })}
            </div>
            <button
                type="button"
                class="btn btn-link day-selector-shortcut"
                disabled={props.disabled}
                onclick={weekdays_shortcut}
            >
                {"Lunes a Viernes"}
            </button>
        </div>
    }
}
