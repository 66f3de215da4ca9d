use reqwest::StatusCode;
use shared::models::PublicUser;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api::AulaClient;
use crate::components::modal::Modal;

/// Admin-only account list with confirm-before-delete rows.
#[function_component(UsersPage)]
pub fn users_page() -> Html {
    let users = use_state(Vec::<PublicUser>::new);
    let is_loading = use_state(|| true);
    let error = use_state(|| None::<String>);
    let pending_delete = use_state(|| None::<PublicUser>);

    {
        let users = users.clone();
        let is_loading = is_loading.clone();
        let error = error.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let client = AulaClient::shared();
                match client.list_users().await {
                    Ok(response) => users.set(response.users),
                    Err(err) => {
                        if err.status() != Some(StatusCode::NOT_FOUND) {
                            error.set(Some("Failed to load users".to_string()));
                        }
                    }
                }
                is_loading.set(false);
            });
            || ()
        });
    }

    let close_modal = {
        let pending_delete = pending_delete.clone();
        Callback::from(move |_| pending_delete.set(None))
    };

    let confirm_delete = {
        let users = users.clone();
        let error = error.clone();
        let pending_delete = pending_delete.clone();
        Callback::from(move |_| {
            let Some(target) = (*pending_delete).clone() else {
                return;
            };
            pending_delete.set(None);
            let users = users.clone();
            let error = error.clone();
            spawn_local(async move {
                let client = AulaClient::shared();
                match client.delete_user(target.id).await {
                    Ok(()) => {
                        let remaining: Vec<PublicUser> = users
                            .iter()
                            .filter(|user| user.id != target.id)
                            .cloned()
                            .collect();
                        users.set(remaining);
                    }
                    Err(err) => {
                        let message = match err.status() {
                            Some(StatusCode::CONFLICT) => {
                                "Cannot delete teacher with active classrooms".to_string()
                            }
                            _ => "Failed to delete user".to_string(),
                        };
                        error.set(Some(message));
                    }
                }
            });
        })
    };

    let request_delete = |user: PublicUser| {
        let pending_delete = pending_delete.clone();
        Callback::from(move |_| pending_delete.set(Some(user.clone())))
    };

    let pending_name = pending_delete
        .as_ref()
        .map(|user: &PublicUser| user.username.clone())
        .unwrap_or_default();

    html! {
        <section>
            <h1 class="text-3xl font-medium mb-6">{"Users"}</h1>

            if let Some(message) = &*error {
                <div class="alert alert-error mb-4">
                    <span>{message.clone()}</span>
                </div>
            }

            if *is_loading {
                <p class="text-neutral-500">{"Loading users..."}</p>
            } else if users.is_empty() {
                <p class="text-neutral-500">{"No users found."}</p>
            } else {
                <table class="table w-full max-w-4xl">
                    <thead>
                        <tr>
                            <th>{"Name"}</th>
                            <th>{"Username"}</th>
                            <th>{"Email"}</th>
                            <th>{"Role"}</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        { for users.iter().map(|user| html! {
                            <tr key={user.id.to_string()}>
                                <td>{user.name.clone()}</td>
                                <td>{user.username.clone()}</td>
                                <td>{user.email.clone()}</td>
                                <td>{user.role.to_string()}</td>
                                <td>
                                    <button
                                        class="btn btn-ghost btn-sm text-error"
                                        onclick={request_delete(user.clone())}
                                    >
                                        {"Delete"}
                                    </button>
                                </td>
                            </tr>
                        }) }
                    </tbody>
                </table>
            }

            <Modal
                open={pending_delete.is_some()}
                title="Delete User"
                on_confirm={confirm_delete}
                on_close={close_modal}
            >
                <p>{format!("Are you sure you want to delete \"{pending_name}\"? This action cannot be undone.")}</p>
            </Modal>
        </section>
    }
}
