use shared::models::{TestSummary, UserRole};
use uuid::Uuid;
use yew::prelude::*;
use yew_icons::{Icon, IconId};
use yew_router::hooks::use_navigator;
use yewdux::prelude::use_selector;

use crate::components::modal::Modal;
use crate::models::app_state::AppState;
use crate::routes::MainRoute;

#[derive(Properties, PartialEq)]
pub struct TestCardProps {
    pub test: TestSummary,
    #[prop_or_default]
    pub on_delete: Option<Callback<Uuid>>,
}

#[function_component(TestCard)]
pub fn test_card(props: &TestCardProps) -> Html {
    let user = use_selector(|state: &AppState| state.user.clone());
    let navigator = use_navigator();
    let show_delete_modal = use_state(|| false);

    let role = user.as_ref().as_ref().map(|user| user.role);
    let can_delete = matches!(role, Some(UserRole::Teacher));
    let can_open = matches!(role, Some(UserRole::Teacher | UserRole::Admin));

    let open_detail = {
        let id = props.test.id;
        Callback::from(move |_| {
            if let (true, Some(nav)) = (can_open, navigator.clone()) {
                nav.push(&MainRoute::TestDetail { id: id.to_string() });
            }
        })
    };

    let open_modal = {
        let show = show_delete_modal.clone();
        Callback::from(move |event: MouseEvent| {
            event.stop_propagation();
            show.set(true);
        })
    };
    let close_modal = {
        let show = show_delete_modal.clone();
        Callback::from(move |_| show.set(false))
    };
    let confirm_delete = {
        let show = show_delete_modal.clone();
        let on_delete = props.on_delete.clone();
        let id = props.test.id;
        Callback::from(move |_| {
            if let Some(callback) = &on_delete {
                callback.emit(id);
            }
            show.set(false);
        })
    };

    let author = props
        .test
        .author_name
        .clone()
        .unwrap_or_else(|| "(deleted account)".to_string());

    html! {
        <div
            class="card bg-base-100 shadow-md hover:shadow-lg transition-all w-80 relative cursor-pointer"
            onclick={open_detail}
        >
            <div class="bg-primary text-primary-content p-6 h-28 flex items-end rounded-t-lg relative">
                <div class="badge badge-accent absolute top-3 left-3">{props.test.category.clone()}</div>
                <h2 class="text-xl font-medium">{props.test.name.clone()}</h2>
            </div>
            <div class="p-4 text-sm text-neutral-500">
                <time>{props.test.created_at}</time>
                <p class="mt-2">{author}</p>
            </div>

            if can_delete && props.on_delete.is_some() {
                <button
                    class="btn btn-ghost btn-sm absolute top-2 right-2"
                    title="Delete test"
                    onclick={open_modal}
                >
                    <Icon icon_id={IconId::HeroiconsOutlineTrash} />
                </button>
            }

            <Modal
                open={*show_delete_modal}
                title="Delete Test"
                on_confirm={confirm_delete}
                on_close={close_modal}
            >
                <p>{format!("Are you sure you want to delete \"{}\"? This action cannot be undone.", props.test.name)}</p>
            </Modal>
        </div>
    }
}
