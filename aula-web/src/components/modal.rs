use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ModalProps {
    pub open: bool,
    pub title: String,
    pub children: Children,
    pub on_confirm: Callback<()>,
    pub on_close: Callback<()>,
}

/// Confirmation dialog used in front of every destructive action.
#[function_component(Modal)]
pub fn modal(props: &ModalProps) -> Html {
    if !props.open {
        return html! {};
    }

    let confirm = {
        let on_confirm = props.on_confirm.clone();
        Callback::from(move |_| on_confirm.emit(()))
    };
    let close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_| on_close.emit(()))
    };

    html! {
        <div class="modal modal-open">
            <div class="modal-box modal-content">
                <h3 class="font-bold text-lg">{props.title.clone()}</h3>
                <div class="py-4">
                    {props.children.clone()}
                </div>
                <div class="modal-action">
                    <button class="btn" onclick={close}>{"Cancel"}</button>
                    <button class="btn btn-error" onclick={confirm}>{"Confirm"}</button>
                </div>
            </div>
        </div>
    }
}
