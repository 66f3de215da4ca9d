use reqwest::StatusCode;
use shared::models::{ClassroomSummary, CreateClassroomRequest, UserRole};
use uuid::Uuid;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yewdux::prelude::use_selector;

use crate::api::AulaClient;
use crate::components::classroom_card::ClassroomCard;
use crate::models::app_state::AppState;

#[function_component(ClassroomsPage)]
pub fn classrooms_page() -> Html {
    let user = use_selector(|state: &AppState| state.user.clone());
    let classrooms = use_state(Vec::<ClassroomSummary>::new);
    let is_loading = use_state(|| true);
    let error = use_state(|| None::<String>);
    let new_name = use_state(String::new);

    {
        let classrooms = classrooms.clone();
        let is_loading = is_loading.clone();
        let error = error.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let client = AulaClient::shared();
                match client.list_classrooms().await {
                    Ok(response) => classrooms.set(response.classrooms),
                    Err(err) => {
                        // An empty store reports 404; show it as an empty
                        // list rather than an error banner.
                        if err.status() != Some(StatusCode::NOT_FOUND) {
                            error.set(Some("Failed to load classrooms".to_string()));
                        }
                    }
                }
                is_loading.set(false);
            });
            || ()
        });
    }

    let is_teacher = user
        .as_ref()
        .as_ref()
        .is_some_and(|user| matches!(user.role, UserRole::Teacher));
    let teacher_id = user.as_ref().as_ref().map(|user| user.id);

    let on_delete = {
        let classrooms = classrooms.clone();
        let error = error.clone();
        Callback::from(move |id: Uuid| {
            let classrooms = classrooms.clone();
            let error = error.clone();
            spawn_local(async move {
                let client = AulaClient::shared();
                match client.delete_classroom(id).await {
                    Ok(()) => {
                        // Drop the row locally instead of refetching.
                        let remaining: Vec<ClassroomSummary> = classrooms
                            .iter()
                            .filter(|room| room.id != id)
                            .cloned()
                            .collect();
                        classrooms.set(remaining);
                    }
                    Err(_) => error.set(Some("Failed to delete classroom".to_string())),
                }
            });
        })
    };

    let on_name_change = {
        let new_name = new_name.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                new_name.set(input.value());
            }
        })
    };

    let on_create = {
        let classrooms = classrooms.clone();
        let error = error.clone();
        let new_name = new_name.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let Some(teacher_id) = teacher_id else {
                return;
            };
            let name = (*new_name).clone();
            let classrooms = classrooms.clone();
            let error = error.clone();
            let new_name = new_name.clone();
            spawn_local(async move {
                let client = AulaClient::shared();
                let request = CreateClassroomRequest { name, teacher_id };
                match client.create_classroom(&request).await {
                    Ok(created) => {
                        let mut updated = (*classrooms).clone();
                        updated.push(ClassroomSummary {
                            id: created.id,
                            name: created.name,
                            teacher_username: String::new(),
                        });
                        classrooms.set(updated);
                        new_name.set(String::new());
                    }
                    Err(_) => error.set(Some("Failed to create classroom".to_string())),
                }
            });
        })
    };

    html! {
        <section>
            <h1 class="text-3xl font-medium mb-6">{"Classrooms"}</h1>

            if let Some(message) = &*error {
                <div class="alert alert-error mb-4">
                    <span>{message.clone()}</span>
                </div>
            }

            if is_teacher {
                <form class="flex gap-2 mb-6 max-w-md" onsubmit={on_create}>
                    <input
                        class="input input-bordered flex-1"
                        type="text"
                        placeholder="New classroom name"
                        value={(*new_name).clone()}
                        oninput={on_name_change}
                    />
                    <button class="btn btn-primary" type="submit" disabled={(*new_name).is_empty()}>
                        {"Create"}
                    </button>
                </form>
            }

            if *is_loading {
                <p class="text-neutral-500">{"Loading classrooms..."}</p>
            } else if classrooms.is_empty() {
                <p class="text-neutral-500">{"No classrooms yet."}</p>
            } else {
                <div class="flex flex-wrap gap-6">
                    { for classrooms.iter().map(|room| html! {
                        <ClassroomCard
                            key={room.id.to_string()}
                            id={room.id}
                            name={room.name.clone()}
                            teacher_username={room.teacher_username.clone()}
                            on_delete={Some(on_delete.clone())}
                        />
                    }) }
                </div>
            }
        </section>
    }
}
