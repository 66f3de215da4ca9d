use gloo_timers::callback::Timeout;
use shared::models::{TestDetail, TestQuestion, UpdateTestRequest, UserRole};
use uuid::Uuid;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yewdux::prelude::use_selector;

use crate::api::AulaClient;
use crate::models::app_state::AppState;

#[derive(Clone, PartialEq)]
struct SaveState {
    is_error: bool,
    message: String,
}

#[derive(Properties, PartialEq)]
pub struct TestDetailPageProps {
    pub test_id: String,
}

#[function_component(TestDetailPage)]
pub fn test_detail_page(props: &TestDetailPageProps) -> Html {
    let user = use_selector(|state: &AppState| state.user.clone());
    let test = use_state(|| None::<TestDetail>);
    let is_loading = use_state(|| true);
    let error = use_state(|| None::<String>);
    let is_saving = use_state(|| false);
    let save_state = use_state(|| None::<SaveState>);

    {
        let test = test.clone();
        let is_loading = is_loading.clone();
        let error = error.clone();
        use_effect_with(props.test_id.clone(), move |test_id| {
            let parsed = Uuid::parse_str(test_id);
            spawn_local(async move {
                match parsed {
                    Ok(id) => {
                        let client = AulaClient::shared();
                        match client.get_test(id).await {
                            Ok(detail) => test.set(Some(detail)),
                            Err(_) => error.set(Some("Test not found".to_string())),
                        }
                    }
                    Err(_) => error.set(Some("Test not found".to_string())),
                }
                is_loading.set(false);
            });
            || ()
        });
    }

    if *is_loading {
        return html! {
            <main class="h-40 rounded-lg bg-base-200 grid place-items-center">
                <p class="text-neutral-500">{"Loading test details..."}</p>
            </main>
        };
    }

    let Some(current) = (*test).clone() else {
        let message = error
            .as_ref()
            .cloned()
            .unwrap_or_else(|| "Test not found".to_string());
        return html! {
            <main class="p-8">
                <p class="alert alert-error max-w-2xl">{message}</p>
            </main>
        };
    };

    // Only the author edits; everyone else gets a read-only view.
    let is_author = user.as_ref().as_ref().is_some_and(|user| {
        matches!(user.role, UserRole::Teacher)
            && Some(user.username.as_str()) == current.author_username.as_deref()
    });

    let on_name_change = {
        let test = test.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                if let Some(mut detail) = (*test).clone() {
                    detail.name = input.value();
                    test.set(Some(detail));
                }
            }
        })
    };

    let on_category_change = {
        let test = test.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                if let Some(mut detail) = (*test).clone() {
                    detail.category = input.value();
                    test.set(Some(detail));
                }
            }
        })
    };

    let on_question_change = {
        let test = test.clone();
        Callback::from(move |(position, prompt): (i32, String)| {
            if let Some(mut detail) = (*test).clone() {
                if let Some(question) = detail
                    .questions
                    .iter_mut()
                    .find(|question| question.position == position)
                {
                    question.prompt = prompt;
                }
                test.set(Some(detail));
            }
        })
    };

    let on_add_question = {
        let test = test.clone();
        Callback::from(move |_| {
            if let Some(mut detail) = (*test).clone() {
                let next = detail
                    .questions
                    .iter()
                    .map(|question| question.position)
                    .max()
                    .map_or(0, |max| max + 1);
                detail.questions.push(TestQuestion {
                    position: next,
                    prompt: String::new(),
                    answer: String::new(),
                });
                test.set(Some(detail));
            }
        })
    };

    let on_save = {
        let test = test.clone();
        let is_saving = is_saving.clone();
        let save_state = save_state.clone();
        Callback::from(move |_| {
            let Some(detail) = (*test).clone() else {
                return;
            };
            is_saving.set(true);
            save_state.set(None);
            let is_saving = is_saving.clone();
            let save_state = save_state.clone();
            spawn_local(async move {
                let client = AulaClient::shared();
                let request = UpdateTestRequest {
                    id: detail.id,
                    name: detail.name.clone(),
                    category: detail.category.clone(),
                    questions: detail.questions.clone(),
                };
                let next = match client.update_test(&request).await {
                    Ok(()) => SaveState {
                        is_error: false,
                        message: "Changes saved successfully!".to_string(),
                    },
                    Err(_) => SaveState {
                        is_error: true,
                        message: "Failed to save changes".to_string(),
                    },
                };
                save_state.set(Some(next));
                is_saving.set(false);

                // Clear the status line after a short delay.
                let save_state = save_state.clone();
                Timeout::new(2_500, move || save_state.set(None)).forget();
            });
        })
    };

    let author_line = match (&current.author_name, &current.author_username) {
        (Some(name), Some(username)) => format!("{name} · {username}"),
        _ => "(deleted account)".to_string(),
    };

    html! {
        <main class="bg-base-200 rounded-lg overflow-hidden">
            <header class="bg-primary text-primary-content">
                <section class="max-w-5xl mx-auto px-6 py-4 flex justify-between items-start">
                    <div>
                        <h1 class="text-3xl font-medium mb-1">{current.name.clone()}</h1>
                        <div class="flex items-center gap-2 text-sm opacity-90">
                            <span>{author_line}</span>
                            <span>{"•"}</span>
                            <span>{current.category.clone()}</span>
                        </div>
                    </div>
                    <time class="text-sm opacity-75">{current.created_at}</time>
                </section>
            </header>

            <div class="max-w-5xl mx-auto px-6 py-8">
                if is_author {
                    <div class="card bg-base-100 shadow-md mb-8">
                        <div class="card-body">
                            <h2 class="card-title">{"Settings"}</h2>
                            <label class="label" for="test-name">
                                <span class="label-text">{"Name"}</span>
                            </label>
                            <input
                                id="test-name"
                                class="input input-bordered"
                                value={current.name.clone()}
                                oninput={on_name_change}
                            />
                            <label class="label" for="test-category">
                                <span class="label-text">{"Category"}</span>
                            </label>
                            <input
                                id="test-category"
                                class="input input-bordered"
                                value={current.category.clone()}
                                oninput={on_category_change}
                            />
                        </div>
                    </div>
                }

                <h2 class="text-xl font-medium mb-4">{"Questions"}</h2>
                <ol class="space-y-3">
                    { for current.questions.iter().map(|question| {
                        let position = question.position;
                        let on_question_change = on_question_change.clone();
                        let oninput = Callback::from(move |event: InputEvent| {
                            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                                on_question_change.emit((position, input.value()));
                            }
                        });
                        html! {
                            <li key={position.to_string()} class="card bg-base-100 shadow-sm p-4">
                                if is_author {
                                    <input
                                        class="input input-bordered w-full"
                                        value={question.prompt.clone()}
                                        {oninput}
                                    />
                                } else {
                                    <p>{question.prompt.clone()}</p>
                                }
                            </li>
                        }
                    }) }
                </ol>

                if is_author {
                    <div class="mt-6 flex items-center justify-end gap-4">
                        <button class="btn" onclick={on_add_question}>{"Add question"}</button>
                        if let Some(state) = &*save_state {
                            <p class={if state.is_error { "text-error text-sm" } else { "text-success text-sm" }}>
                                {state.message.clone()}
                            </p>
                        }
                        <button
                            class="btn btn-primary"
                            disabled={*is_saving}
                            onclick={on_save}
                        >
                            {if *is_saving { "Saving..." } else { "Save Changes" }}
                        </button>
                    </div>
                }
            </div>
        </main>
    }
}
