use yew::prelude::*;
use web_sys::MouseEvent;
use shared::Session;
use crate::routes::AppPage;

#[derive(Properties, PartialEq)]
pub struct NavbarProps {
    pub session: Session,
    pub current: AppPage,
    pub on_navigate: Callback<AppPage>,
    pub on_logout: Callback<()>,
}

#[function_component(Navbar)]
pub fn navbar(props: &NavbarProps) -> Html {
    let on_logout = props.on_logout.reform(|_: MouseEvent| ());

    html! {
        <nav class="navbar">
            <div class="navbar-container">
                <span class="navbar-logo">{"Sistema de Asistencias"}</span>
                <div class="navbar-menu">
                    {for AppPage::menu_for(&props.session).into_iter().map(|page| {
                        let active = page.same_section(&props.current);
                        let onclick = {
                            let page = page.clone();
                            props.on_navigate.reform(move |_: MouseEvent| page.clone())
                        };
                        html! {
                            <button class={classes!("navbar-link", active.then_some("active"))} {onclick}>
                                {page.title()}
                            </button>
                        }
                    })}
                    <div class="navbar-user">
                        <span class="user-name">{props.session.name.clone()}</span>
                        <span class="user-role">{format!("({})", props.session.role.label())}</span>
                        <button class="logout-btn" onclick={on_logout}>{"Cerrar Sesión"}</button>
                    </div>
                </div>
            </div>
        </nav>
    }
}
