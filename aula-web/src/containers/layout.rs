use yew::prelude::*;

use crate::containers::header::Header;
use crate::routes::MainRoute;

#[derive(Properties, PartialEq)]
pub struct LayoutProps {
    pub children: Children,
    #[prop_or_default]
    pub current_route: Option<MainRoute>,
    pub on_logout: Callback<()>,
}

#[function_component(Layout)]
pub fn layout(props: &LayoutProps) -> Html {
    html! {
        <>
            <Header on_logout={props.on_logout.clone()} />
            <main class="min-h-screen bg-base-100">
                <div class="px-8 pt-10">
                    {props.children.clone()}
                </div>
            </main>
        </>
    }
}
