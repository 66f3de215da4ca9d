use wasm_bindgen_futures::spawn_local;
use yew::{Callback, Html, function_component, html, use_effect_with};
use yew_router::prelude::*;
use yewdux::prelude::use_store;

use crate::api::AulaClient;
use crate::components::loading::Loading;
use crate::models::app_state::AppState;
use crate::routes::MainRoute;

#[function_component(App)]
pub fn app() -> Html {
    let (state, dispatch) = use_store::<AppState>();

    // Session check on mount: rendering is suspended behind the loading
    // indicator until /auth/me resolves.
    {
        let dispatch = dispatch.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let client = AulaClient::shared();
                match client.me().await {
                    Ok(me) => dispatch.set(AppState {
                        checked: true,
                        user: Some(me.user),
                    }),
                    Err(_) => dispatch.set(AppState {
                        checked: true,
                        user: None,
                    }),
                }
            });
            || ()
        });
    }

    let logout_callback = {
        let dispatch = dispatch.clone();
        Callback::from(move |()| {
            let dispatch = dispatch.clone();
            spawn_local(async move {
                let client = AulaClient::shared();
                let _ = client.logout().await;
                dispatch.set(AppState {
                    checked: true,
                    user: None,
                });
            });
        })
    };

    if !state.checked {
        return html! { <Loading /> };
    }

    html! {
        <BrowserRouter>
            <Switch<MainRoute> render={move |route| crate::routes::switch_with_logout(route, logout_callback.clone())} />
        </BrowserRouter>
    }
}
