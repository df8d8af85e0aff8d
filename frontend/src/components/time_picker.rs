use yew::prelude::*;
use web_sys::HtmlSelectElement;
use shared::time::{TimeOfDay, MINUTE_OPTIONS};

#[derive(Properties, PartialEq)]
pub struct TimePickerProps {
    pub id: AttrValue,
    pub label: AttrValue,
    /// `HH:MM`
    pub value: String,
    pub on_change: Callback<String>,
    #[prop_or_default]
    pub disabled: bool,
}

#[function_component(TimePicker)]
pub fn time_picker(props: &TimePickerProps) -> Html {
    let current = props
        .value
        .parse::<TimeOfDay>()
        .ok()
        .or_else(|| TimeOfDay::new(0, 0));
    let hour = current.map(|t| t.hour()).unwrap_or(0);
    let minute = current.map(|t| t.minute()).unwrap_or(0);

    let on_hour_change = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Some(time) = select
                .value()
                .parse::<u32>()
                .ok()
                .and_then(|h| TimeOfDay::new(h, minute))
            {
                on_change.emit(time.to_string());
            }
        })
    };

    let on_minute_change = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Some(time) = select
                .value()
                .parse::<u32>()
                .ok()
                .and_then(|m| TimeOfDay::new(hour, m))
            {
                on_change.emit(time.to_string());
            }
        })
    };

    html! {
        <div class="form-group time-picker">
            <label for={props.id.clone()}>{props.label.clone()}</label>
            <div class="time-picker-fields">
                <select id={props.id.clone()} onchange={on_hour_change} disabled={props.disabled}>
                    {for (0..24u32).map(|h| html! {
                        <option value={h.to_string()} selected={h == hour}>{format!("{:02}", h)}</option>
                    })}
                </select>
                <span>{":"}</span>
                <select onchange={on_minute_change} disabled={props.disabled}>
                    {for MINUTE_OPTIONS.iter().map(|m| html! {
                        <option value={m.to_string()} selected={*m == minute}>{format!("{:02}", m)}</option>
                    })}
                    // Keep a stored off-grid minute selectable
                    {if MINUTE_OPTIONS.contains(&minute) {
                        html! {}
                    } else {
                        html! { <option value={minute.to_string()} selected=true>{format!("{:02}", minute)}</option> }
                    }}
                </select>
            </div>
        </div>
    }
}
