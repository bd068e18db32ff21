use crate::components::brd::BrdGeneratorComponent;
use yew::{html, Component, Context, Html};

pub struct App;

impl Component for App {
    type Message = ();
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        html! {
            <div>
                <header style="background:#0b3d91;color:#fff;padding:16px 24px;">
                    <div style="font-size:20px;font-weight:bold;">{"BRD Studio"}</div>
                    <div style="font-size:12px;opacity:0.85;">
                        {"Business Requirements Documents from a description and your documents"}
                    </div>
                </header>
                <BrdGeneratorComponent />
            </div>
        }
    }
}
