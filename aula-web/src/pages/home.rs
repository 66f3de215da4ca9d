use shared::models::{TestResultView, UserRole};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yewdux::prelude::use_selector;

use crate::api::AulaClient;
use crate::models::app_state::AppState;

#[function_component(HomePage)]
pub fn home_page() -> Html {
    let user = use_selector(|state: &AppState| state.user.clone());
    let results = use_state(Vec::<TestResultView>::new);

    let is_student = user
        .as_ref()
        .as_ref()
        .is_some_and(|user| matches!(user.role, UserRole::Student));

    // Students get their recorded results on the landing page.
    {
        let results = results.clone();
        use_effect_with(is_student, move |&is_student| {
            if is_student {
                spawn_local(async move {
                    let client = AulaClient::shared();
                    if let Ok(response) = client.my_results().await {
                        results.set(response.results);
                    }
                });
            }
            || ()
        });
    }

    let greeting = user
        .as_ref()
        .as_ref()
        .map(|user| format!("Hello, {}!", user.name))
        .unwrap_or_default();

    html! {
        <section>
            <h1 class="text-3xl font-medium mb-6">{greeting}</h1>
            if is_student {
                <div class="card bg-base-100 shadow-md max-w-2xl">
                    <div class="card-body">
                        <h2 class="card-title">{"Your results"}</h2>
                        if results.is_empty() {
                            <p class="text-neutral-500">{"No test results yet."}</p>
                        } else {
                            <table class="table">
                                <thead>
                                    <tr>
                                        <th>{"Test"}</th>
                                        <th>{"Score"}</th>
                                        <th>{"Taken"}</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    { for results.iter().map(|result| html! {
                                        <tr key={result.id.to_string()}>
                                            <td>{result.test_name.clone()}</td>
                                            <td>{result.score}</td>
                                            <td>{result.taken_at}</td>
                                        </tr>
                                    }) }
                                </tbody>
                            </table>
                        }
                    </div>
                </div>
            } else {
                <p class="text-neutral-500">
                    {"Use the navigation above to manage classrooms and tests."}
                </p>
            }
        </section>
    }
}
