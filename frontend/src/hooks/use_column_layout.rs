use yew::prelude::*;
use shared::ColumnLayout;
use crate::services::storage::LocalPreferences;

pub struct UseColumnLayoutResult {
    pub layout: ColumnLayout,
    pub actions: UseColumnLayoutActions,
}

#[derive(Clone, PartialEq)]
pub struct UseColumnLayoutActions {
    pub toggle: Callback<String>,
    pub move_left: Callback<String>,
    pub move_right: Callback<String>,
    pub reset: Callback<()>,
}

enum ColumnChange {
    Toggle(String),
    MoveLeft(String),
    MoveRight(String),
    Reset,
}

fn apply(layout: &mut ColumnLayout, change: ColumnChange) {
    match change {
        ColumnChange::Toggle(key) => layout.toggle(&key),
        ColumnChange::MoveLeft(key) => layout.move_left(&key),
        ColumnChange::MoveRight(key) => layout.move_right(&key),
        ColumnChange::Reset => layout.reset(),
    }
}

/// Table column order and visibility, persisted in local storage
#[hook]
pub fn use_column_layout(storage_key: &'static str, defaults: &'static [&'static str]) -> UseColumnLayoutResult {
    let layout = use_state(|| ColumnLayout::load(&LocalPreferences, storage_key, defaults));

    let update = {
        let layout = layout.clone();
        Callback::from(move |change: ColumnChange| {
            let mut next = (*layout).clone();
            apply(&mut next, change);
            next.save(&LocalPreferences);
            layout.set(next);
        })
    };

    let actions = UseColumnLayoutActions {
        toggle: update.reform(ColumnChange::Toggle),
        move_left: update.reform(ColumnChange::MoveLeft),
        move_right: update.reform(ColumnChange::MoveRight),
        reset: update.reform(|_: ()| ColumnChange::Reset),
    };

    UseColumnLayoutResult {
        layout: (*layout).clone(),
        actions,
    }
}
