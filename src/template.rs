use log::debug;

use crate::errors::{Error, Result};
use crate::parser::ast::Marker;
use crate::parser::parse;

/// This is the parsed equivalent of a template file.
/// The source is kept as is: rendering always starts again from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    /// Name of the template, usually very similar to the path
    pub name: String,
    /// Original path of the file. A template doesn't necessarily have
    /// a file associated with it though so it's optional.
    pub path: Option<String>,
    /// Raw text of the template
    pub source: String,
    /// The markers found when scanning the source
    pub markers: Vec<Marker>,
}

impl Template {
    /// Scan the template source and keep it around
    pub fn new(tpl_name: &str, tpl_path: Option<String>, input: &str) -> Result<Template> {
        let markers = parse(input)
            .map_err(|e| Error::chain(format!("Failed to parse {:?}", tpl_name), e))?;

        Ok(Template {
            name: tpl_name.to_string(),
            path: tpl_path,
            source: input.to_string(),
            markers,
        })
    }

    /// Names of the `{@name}` tokens, in order of first appearance
    pub fn placeholders(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for marker in &self.markers {
            if let Marker::Token(ref n) = *marker {
                if !names.contains(&n.as_str()) {
                    names.push(n);
                }
            }
        }
        names
    }

    /// Names of the `{@each:name}` blocks, in order of first appearance
    pub fn blocks(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for marker in &self.markers {
            if let Marker::BlockStart(ref n) = *marker {
                if !names.contains(&n.as_str()) {
                    names.push(n);
                }
            }
        }
        names
    }

    /// Checks that every block is closed by its own `{@endeach:name}` and that blocks don't nest.
    ///
    /// A block appearing several times is accepted but only the first one will
    /// ever be expanded.
    pub fn validate_blocks(&self) -> Result<()> {
        let mut open: Option<&str> = None;
        let mut seen: Vec<&str> = Vec::new();

        for marker in &self.markers {
            match *marker {
                Marker::BlockStart(ref n) => {
                    if let Some(outer) = open {
                        debug!("Template {:?} nests block `{}` in `{}`", self.name, n, outer);
                        return Err(Error::malformed_block(outer));
                    }
                    if seen.contains(&n.as_str()) {
                        debug!(
                            "Block `{}` is repeated in template {:?}, only the first one is expanded",
                            n, self.name
                        );
                    }
                    open = Some(n.as_str());
                }
                Marker::BlockEnd(ref n) => match open {
                    Some(o) if o == n.as_str() => {
                        seen.push(o);
                        open = None;
                    }
                    _ => return Err(Error::malformed_block(n)),
                },
                Marker::Text(_) | Marker::Token(_) => (),
            }
        }

        if let Some(n) = open {
            return Err(Error::missing_block(n));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Template;
    use crate::errors::ErrorKind;

    #[test]
    fn can_list_placeholders_in_order() {
        let tpl =
            Template::new("hello", None, "{@b} {@a} {@each:r}{@c}{@b}{@endeach:r} {@a}").unwrap();
        assert_eq!(tpl.placeholders(), vec!["b", "a", "c"]);
        assert_eq!(tpl.blocks(), vec!["r"]);
    }

    #[test]
    fn keeps_the_source_untouched() {
        let source = "<div>{@answer}</div>";
        let tpl = Template::new("hello", Some("hello.html".to_string()), source).unwrap();
        assert_eq!(tpl.source, source);
        assert_eq!(tpl.path, Some("hello.html".to_string()));
    }

    #[test]
    fn valid_blocks_pass() {
        let inputs = vec![
            "",
            "no blocks",
            "{@each:a}{@x}{@endeach:a}",
            "{@each:a}{@endeach:a}{@each:b}{@endeach:b}",
            "{@each:a}1{@endeach:a}{@each:a}2{@endeach:a}",
        ];
        for input in inputs {
            let tpl = Template::new("tpl", None, input).unwrap();
            assert!(tpl.validate_blocks().is_ok(), "{:?} should be valid", input);
        }
    }

    #[test]
    fn endeach_before_each_is_malformed() {
        let tpl = Template::new("tpl", None, "{@endeach:a}{@each:a}").unwrap();
        let err = tpl.validate_blocks().unwrap_err();
        assert_eq!(err.to_string(), "Block `a` is malformed: `{@endeach:a}` must follow `{@each:a}`");
        assert!(err.is_fatal());
    }

    #[test]
    fn nested_blocks_are_malformed() {
        let inputs = vec![
            "{@each:a}{@each:b}{@endeach:b}{@endeach:a}",
            "{@each:a}{@each:a}{@endeach:a}{@endeach:a}",
        ];
        for input in inputs {
            let tpl = Template::new("tpl", None, input).unwrap();
            let err = tpl.validate_blocks().unwrap_err();
            assert!(matches!(err.kind, ErrorKind::MalformedBlock(ref name) if name == "a"));
        }
    }

    #[test]
    fn unclosed_block_is_missing() {
        let tpl = Template::new("tpl", None, "{@each:a} and nothing").unwrap();
        let err = tpl.validate_blocks().unwrap_err();
        assert!(matches!(err.kind, ErrorKind::MissingBlock(ref name) if name == "a"));
    }
}
