use crate::{containers::layout::Layout, models::app_state::AppState, pages::*};
use shared::models::UserRole;
use strum::EnumIter;
use yew::Callback;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::use_selector;

/// The main routes
#[derive(Debug, Clone, PartialEq, Routable, EnumIter)]
pub enum MainRoute {
    #[at("/")]
    Login,
    #[at("/home")]
    Home,
    #[at("/classroom")]
    Classrooms,
    #[at("/test")]
    Tests,
    #[at("/test/:id")]
    TestDetail { id: String },
    #[at("/users")]
    Users,
    #[at("/profile")]
    Profile,
    #[not_found]
    #[at("/404")]
    NotFound,
}

#[derive(Properties, PartialEq)]
pub struct MainRouteViewProps {
    pub route: MainRoute,
    pub on_logout: Callback<()>,
}

#[function_component(MainRouteView)]
fn main_route_view(props: &MainRouteViewProps) -> Html {
    let user = use_selector(|state: &AppState| state.user.clone());
    let user_opt = (*user).clone();
    let is_authenticated = user_opt.is_some();
    // Role gating is matched exhaustively so a new role cannot slip
    // through unnoticed.
    let role = user_opt.as_ref().map(|user| user.role);
    let sees_tests = match role {
        Some(UserRole::Teacher | UserRole::Admin) => true,
        Some(UserRole::Student) | None => false,
    };
    let is_admin = matches!(role, Some(UserRole::Admin));
    let on_logout = props.on_logout.clone();

    let page = |inner: Html| {
        let logout_cb = on_logout.clone();
        html! {
            <Layout current_route={props.route.clone()} on_logout={logout_cb}>
                {inner}
            </Layout>
        }
    };

    match props.route.clone() {
        MainRoute::Login => {
            if is_authenticated {
                html! { <Redirect<MainRoute> to={MainRoute::Home} /> }
            } else {
                html! { <LoginPage /> }
            }
        }
        MainRoute::Home => {
            if !is_authenticated {
                return html! { <Redirect<MainRoute> to={MainRoute::Login} /> };
            }
            page(html! { <HomePage /> })
        }
        MainRoute::Classrooms => {
            if !is_authenticated {
                return html! { <Redirect<MainRoute> to={MainRoute::Login} /> };
            }
            page(html! { <ClassroomsPage /> })
        }
        MainRoute::Tests => {
            if !is_authenticated {
                return html! { <Redirect<MainRoute> to={MainRoute::Login} /> };
            }
            if !sees_tests {
                return html! { <Redirect<MainRoute> to={MainRoute::Home} /> };
            }
            page(html! { <TestsPage /> })
        }
        MainRoute::TestDetail { id } => {
            if !is_authenticated {
                return html! { <Redirect<MainRoute> to={MainRoute::Login} /> };
            }
            if !sees_tests {
                return html! { <Redirect<MainRoute> to={MainRoute::Home} /> };
            }
            page(html! { <TestDetailPage test_id={id} /> })
        }
        MainRoute::Users => {
            if !is_authenticated {
                return html! { <Redirect<MainRoute> to={MainRoute::Login} /> };
            }
            if !is_admin {
                return html! { <Redirect<MainRoute> to={MainRoute::Home} /> };
            }
            page(html! { <UsersPage /> })
        }
        MainRoute::Profile => {
            if !is_authenticated {
                return html! { <Redirect<MainRoute> to={MainRoute::Login} /> };
            }
            page(html! { <ProfilePage /> })
        }
        MainRoute::NotFound => {
            if !is_authenticated {
                return html! { <Redirect<MainRoute> to={MainRoute::Login} /> };
            }
            page(html! { <ErrorPage /> })
        }
    }
}

/// Switch function for the main routes.
pub fn switch_with_logout(route: MainRoute, on_logout: Callback<()>) -> Html {
    html! { <MainRouteView {route} {on_logout} /> }
}
