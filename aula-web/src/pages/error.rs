use yew::prelude::*;

#[function_component(ErrorPage)]
pub fn error_page() -> Html {
    html! {
        <div class="grid place-items-center h-64">
            <div class="text-center">
                <h1 class="text-4xl font-medium">{"404"}</h1>
                <p class="text-neutral-500 mt-2">{"This page does not exist."}</p>
            </div>
        </div>
    }
}
