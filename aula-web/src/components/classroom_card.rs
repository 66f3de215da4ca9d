use shared::models::UserRole;
use uuid::Uuid;
use yew::prelude::*;
use yew_icons::{Icon, IconId};
use yewdux::prelude::use_selector;

use crate::components::modal::Modal;
use crate::models::app_state::AppState;

#[derive(Properties, PartialEq)]
pub struct ClassroomCardProps {
    pub id: Uuid,
    pub name: String,
    pub teacher_username: String,
    #[prop_or_default]
    pub on_delete: Option<Callback<Uuid>>,
}

#[function_component(ClassroomCard)]
pub fn classroom_card(props: &ClassroomCardProps) -> Html {
    let user = use_selector(|state: &AppState| state.user.clone());
    let show_delete_modal = use_state(|| false);

    // Students never see the delete affordance.
    let can_delete = user.as_ref().as_ref().is_some_and(|user| match user.role {
        UserRole::Teacher | UserRole::Admin => true,
        UserRole::Student => false,
    });

    let open_modal = {
        let show = show_delete_modal.clone();
        Callback::from(move |_| show.set(true))
    };
    let close_modal = {
        let show = show_delete_modal.clone();
        Callback::from(move |_| show.set(false))
    };
    let confirm_delete = {
        let show = show_delete_modal.clone();
        let on_delete = props.on_delete.clone();
        let id = props.id;
        Callback::from(move |_| {
            if let Some(callback) = &on_delete {
                callback.emit(id);
            }
            show.set(false);
        })
    };

    html! {
        <div class="card bg-base-100 shadow-md hover:shadow-lg transition-all w-80 relative">
            <div class="bg-primary text-primary-content p-6 h-32 flex items-end rounded-t-lg">
                <h2 class="text-xl font-medium">{props.name.clone()}</h2>
            </div>
            <div class="p-4">
                <p class="text-neutral-500 text-sm">{format!("Teacher: {}", props.teacher_username)}</p>
            </div>

            if can_delete && props.on_delete.is_some() {
                <button
                    class="btn btn-ghost btn-sm absolute top-2 right-2"
                    title="Delete classroom"
                    onclick={open_modal}
                >
                    <Icon icon_id={IconId::HeroiconsOutlineTrash} />
                </button>
            }

            <Modal
                open={*show_delete_modal}
                title="Delete Classroom"
                on_confirm={confirm_delete}
                on_close={close_modal}
            >
                <p>{format!("Are you sure you want to delete \"{}\"? This action cannot be undone.", props.name)}</p>
            </Modal>
        </div>
    }
}
