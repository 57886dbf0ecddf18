use std::rc::Rc;

use gloo_timers::callback::Timeout;
use yew::prelude::*;

use crate::notification::{Notifier, ToastEntry, ToastLifecycle, ToastRequest, ToastStack};

pub enum ToastAction {
    Push(ToastRequest),
    Dismiss(u32),
    Remove(u32),
}

impl Reducible for ToastStack {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        let changed = match action {
            ToastAction::Push(request) => {
                next.push(request.kind, request.message);
                true
            }
            ToastAction::Dismiss(id) => next.dismiss(id),
            ToastAction::Remove(id) => next.remove(id),
        };
        if changed {
            Rc::new(next)
        } else {
            self
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct ToastHostProps {
    pub notifier: Notifier,
    pub lifecycle: ToastLifecycle,
}

/// Renders every live toast. Mounted once into its own host element.
#[function_component(ToastHost)]
pub fn toast_host(props: &ToastHostProps) -> Html {
    let stack = use_reducer(ToastStack::default);

    {
        let notifier = props.notifier.clone();
        let dispatcher = stack.dispatcher();
        use_effect_with_deps(
            move |_| {
                notifier.connect(Callback::from(move |request| {
                    dispatcher.dispatch(ToastAction::Push(request));
                }));
                move || notifier.disconnect()
            },
            (),
        );
    }

    let on_dismiss = {
        let dispatcher = stack.dispatcher();
        Callback::from(move |id: u32| dispatcher.dispatch(ToastAction::Dismiss(id)))
    };
    let on_remove = {
        let dispatcher = stack.dispatcher();
        Callback::from(move |id: u32| dispatcher.dispatch(ToastAction::Remove(id)))
    };

    html! {
        <>
            { for stack.entries().iter().map(|toast| html! {
                <Toast
                    key={toast.id}
                    toast={toast.clone()}
                    lifecycle={props.lifecycle}
                    on_dismiss={on_dismiss.clone()}
                    on_remove={on_remove.clone()}
                />
            }) }
        </>
    }
}

/// Delay before a toast is removed: only armed once its exit has started.
fn removal_delay_ms(lifecycle: &ToastLifecycle, leaving: bool) -> Option<u32> {
    leaving.then(|| lifecycle.exit_ms())
}

#[derive(Properties, PartialEq)]
pub struct ToastProps {
    pub toast: ToastEntry,
    pub lifecycle: ToastLifecycle,
    pub on_dismiss: Callback<u32>,
    pub on_remove: Callback<u32>,
}

#[function_component(Toast)]
pub fn toast(props: &ToastProps) -> Html {
    let id = props.toast.id;

    // Auto-dismiss
    {
        let on_dismiss = props.on_dismiss.clone();
        let lifetime_ms = props.lifecycle.lifetime_ms();
        use_effect_with_deps(
            move |_| {
                let timeout = Timeout::new(lifetime_ms, move || on_dismiss.emit(id));
                move || drop(timeout)
            },
            (),
        );
    }

    // Exit animation, then removal
    {
        let on_remove = props.on_remove.clone();
        let lifecycle = props.lifecycle;
        use_effect_with_deps(
            move |leaving: &bool| {
                let timeout = removal_delay_ms(&lifecycle, *leaving)
                    .map(|delay| Timeout::new(delay, move || on_remove.emit(id)));
                move || drop(timeout)
            },
            props.toast.leaving,
        );
    }

    let close = {
        let on_dismiss = props.on_dismiss.clone();
        Callback::from(move |_: MouseEvent| on_dismiss.emit(id))
    };

    let kind = props.toast.kind;
    let animation = if props.toast.leaving {
        format!("slideOutRight {}ms ease-out", props.lifecycle.exit_ms())
    } else {
        "slideInRight 0.3s ease-out".to_string()
    };
    let style = format!(
        "position: fixed; top: 100px; right: 20px; background: {}; color: white; \
         padding: 1rem 1.5rem; border-radius: 10px; box-shadow: 0 10px 30px rgba(0,0,0,0.3); \
         z-index: 10000; max-width: 400px; animation: {};",
        kind.background(),
        animation
    );

    html! {
        <div class={classes!("notification", format!("notification-{}", kind.as_str()))} style={style}>
            <div class="notification-content">
                <i class={classes!("fas", kind.icon_class())}></i>
                <span>{ props.toast.message.clone() }</span>
                <button class="notification-close" onclick={close}>{"\u{00d7}"}</button>
            </div>
        </div>
    }
}
