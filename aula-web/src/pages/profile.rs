use gloo_timers::callback::Timeout;
use reqwest::StatusCode;
use shared::models::UpdateUserRequest;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yewdux::prelude::use_store;

use crate::api::AulaClient;
use crate::models::app_state::AppState;

#[function_component(ProfilePage)]
pub fn profile_page() -> Html {
    let (state, dispatch) = use_store::<AppState>();
    let user = state.user.clone();

    let name = use_state(|| {
        user.as_ref()
            .map(|user| user.name.clone())
            .unwrap_or_default()
    });
    let username = use_state(|| {
        user.as_ref()
            .map(|user| user.username.clone())
            .unwrap_or_default()
    });
    let is_saving = use_state(|| false);
    let status = use_state(|| None::<(bool, String)>);

    let Some(current) = user else {
        return html! {};
    };

    let on_name_change = {
        let name = name.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                name.set(input.value());
            }
        })
    };

    let on_username_change = {
        let username = username.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                username.set(input.value());
            }
        })
    };

    let onsubmit = {
        let name = name.clone();
        let username = username.clone();
        let is_saving = is_saving.clone();
        let status = status.clone();
        let dispatch = dispatch.clone();
        let current = current.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            is_saving.set(true);
            status.set(None);

            let request = UpdateUserRequest {
                id: current.id,
                name: (*name).clone(),
                username: (*username).clone(),
            };
            let is_saving = is_saving.clone();
            let status = status.clone();
            let dispatch = dispatch.clone();
            let mut updated = current.clone();
            spawn_local(async move {
                let client = AulaClient::shared();
                let next = match client.update_user(&request).await {
                    Ok(()) => {
                        updated.name = request.name.clone();
                        updated.username = request.username.clone();
                        dispatch.set(AppState {
                            checked: true,
                            user: Some(updated),
                        });
                        (false, "Profile updated successfully!".to_string())
                    }
                    Err(err) => {
                        let message = match err.status() {
                            Some(StatusCode::CONFLICT) => "Username already in use".to_string(),
                            Some(StatusCode::BAD_REQUEST) => {
                                "Name and username are required".to_string()
                            }
                            _ => "Failed to update profile".to_string(),
                        };
                        (true, message)
                    }
                };
                status.set(Some(next));
                is_saving.set(false);

                let status = status.clone();
                Timeout::new(2_500, move || status.set(None)).forget();
            });
        })
    };

    html! {
        <section class="max-w-md">
            <h1 class="text-3xl font-medium mb-6">{"Profile"}</h1>

            <div class="card bg-base-100 shadow-md">
                <form class="card-body" onsubmit={onsubmit}>
                    <label class="label" for="profile-name">
                        <span class="label-text">{"Name"}</span>
                    </label>
                    <input
                        id="profile-name"
                        class="input input-bordered"
                        value={(*name).clone()}
                        oninput={on_name_change}
                    />

                    <label class="label" for="profile-username">
                        <span class="label-text">{"Username"}</span>
                    </label>
                    <input
                        id="profile-username"
                        class="input input-bordered"
                        value={(*username).clone()}
                        oninput={on_username_change}
                    />

                    <p class="text-sm text-neutral-500 mt-2">
                        {format!("Email: {}", current.email)}
                    </p>
                    <p class="text-sm text-neutral-500">
                        {format!("Role: {}", current.role)}
                    </p>

                    if let Some((is_error, message)) = &*status {
                        <p class={if *is_error { "text-error text-sm" } else { "text-success text-sm" }}>
                            {message.clone()}
                        </p>
                    }

                    <div class="form-control mt-4">
                        <button
                            class="btn btn-primary"
                            type="submit"
                            disabled={*is_saving || (*name).is_empty() || (*username).is_empty()}
                        >
                            {if *is_saving { "Saving..." } else { "Save" }}
                        </button>
                    </div>
                </form>
            </div>
        </section>
    }
}
