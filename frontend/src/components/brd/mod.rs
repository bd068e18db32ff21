//! BRD generator: the single screen of the application.
//!
//! Root module wiring the Yew `Component` implementation to its submodules:
//! - `state`, `messages`, `props`: the Elm-style model.
//! - `update`, `view`: state transitions and rendering.
//! - `files`, `api`, `rasterize`: the asynchronous work (file reads, backend
//!   calls, off-screen rendering for the PDF export).

use yew::prelude::*;

mod api;
mod browser_file;
mod files;
mod helpers;
mod messages;
mod props;
mod rasterize;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::BrdGeneratorProps;
pub use state::BrdGeneratorComponent;

impl Component for BrdGeneratorComponent {
    type Message = Msg;
    type Properties = BrdGeneratorProps;

    fn create(ctx: &Context<Self>) -> Self {
        BrdGeneratorComponent::new(ctx.props().initial_model.clone())
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }
}
