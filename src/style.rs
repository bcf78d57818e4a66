/// Presentation flags that end up as classes on the field's container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldStyle {
    pub class: Option<String>,
    pub required: bool,
    pub disabled: bool,
    pub multiline: bool,
    pub underlined: bool,
}

pub fn container_class(style: &FieldStyle) -> String {
    let flags = [
        (style.required, "is-required"),
        (style.disabled, "is-disabled"),
        (style.multiline, "ms-TextField--multiline"),
        (style.underlined, "ms-TextField--underlined"),
    ];
    std::iter::once("ms-TextField")
        .chain(style.class.as_deref().filter(|c| !c.trim().is_empty()))
        .chain(flags.into_iter().filter(|(on, _)| *on).map(|(_, name)| name))
        .collect::<Vec<&str>>()
        .join(" ")
}

pub fn field_class(has_error: bool) -> &'static str {
    if has_error {
        "ms-TextField-field ms-TextField-invalid"
    } else {
        "ms-TextField-field"
    }
}
