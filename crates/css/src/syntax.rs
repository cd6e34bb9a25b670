// A single CSS property: "font-size: 12px"
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub value: String,
}

impl Declaration {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into().trim().to_ascii_lowercase(),
            value: value.into().trim().to_string(),
        }
    }
}

// input: "font-size: 12px; line-height: normal;"
// output: vec![Declaration { name: "font-size", .. }, Declaration { name: "line-height", .. }]
//
// Only the first ':' separates name from value, so values such as
// `font-family: "a:b"` survive intact.
pub fn parse_declarations(input: &str) -> Vec<Declaration> {
    input
        .split(';')
        .filter_map(|pair| {
            let (n, v) = pair.split_once(':')?;
            let name = n.trim().to_ascii_lowercase();
            if name.is_empty() {
                return None;
            }
            let value = v.trim().to_string();
            Some(Declaration { name, value })
        })
        .collect()
}
