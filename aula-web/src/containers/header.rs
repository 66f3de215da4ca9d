use shared::models::UserRole;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::use_selector;

use crate::models::app_state::AppState;
use crate::routes::MainRoute;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub on_logout: Callback<()>,
}

/// Top navigation bar. Links are gated by role: students never see
/// "Tests", only admins see "Users".
#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let user = use_selector(|state: &AppState| state.user.clone());
    let user_opt = (*user).clone();

    let (username, role) = match &user_opt {
        Some(user) => (user.username.clone(), Some(user.role)),
        None => (String::new(), None),
    };

    let sees_tests = match role {
        Some(UserRole::Teacher | UserRole::Admin) => true,
        Some(UserRole::Student) | None => false,
    };
    let is_admin = matches!(role, Some(UserRole::Admin));

    let logout = {
        let on_logout = props.on_logout.clone();
        Callback::from(move |_| on_logout.emit(()))
    };

    html! {
        <header class="navbar bg-neutral text-neutral-content px-5">
            <div class="flex-1">
                <p>{format!("Welcome, {username}")}</p>
            </div>
            <nav class="flex-none">
                <ul class="menu menu-horizontal gap-4">
                    <li><Link<MainRoute> to={MainRoute::Home}>{"Home"}</Link<MainRoute>></li>
                    if sees_tests {
                        <li><Link<MainRoute> to={MainRoute::Tests}>{"Tests"}</Link<MainRoute>></li>
                    }
                    if is_admin {
                        <li><Link<MainRoute> to={MainRoute::Users}>{"Users"}</Link<MainRoute>></li>
                    }
                    <li><Link<MainRoute> to={MainRoute::Classrooms}>{"Classrooms"}</Link<MainRoute>></li>
                    <li><Link<MainRoute> to={MainRoute::Profile}>{"Profile"}</Link<MainRoute>></li>
                    <li><button onclick={logout}>{"Log out"}</button></li>
                </ul>
            </nav>
        </header>
    }
}
