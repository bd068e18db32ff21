use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct BrdGeneratorProps {
    /// Model preselected in the selector; blank means the shared default.
    #[prop_or_default]
    pub initial_model: Option<String>,
}
