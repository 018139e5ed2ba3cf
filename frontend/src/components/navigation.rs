use yew::prelude::*;

/// Top-level views of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Dashboard,
    Incomes,
    Expenses,
}

impl View {
    pub fn label(&self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Incomes => "Incomes",
            View::Expenses => "Expenses",
        }
    }

    pub fn all() -> [View; 3] {
        [View::Dashboard, View::Incomes, View::Expenses]
    }
}

#[derive(Properties, PartialEq)]
pub struct NavigationProps {
    pub active: View,
    pub on_select: Callback<View>,
}

#[function_component(Navigation)]
pub fn navigation(props: &NavigationProps) -> Html {
    html! {
        <nav class="navigation">
            <ul class="nav-items">
                {for View::all().iter().map(|view| {
                    let view = *view;
                    let is_active = view == props.active;
                    let onclick = {
                        let on_select = props.on_select.clone();
                        Callback::from(move |_| on_select.emit(view))
                    };

                    html! {
                        <li
                            class={if is_active { "nav-item active" } else { "nav-item" }}
                            {onclick}
                        >
                            {view.label()}
                        </li>
                    }
                })}
            </ul>
        </nav>
    }
}
