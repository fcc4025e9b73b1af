use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::prelude::*;
use std::path::{Path, PathBuf};

use globwalk::glob_builder;
use log::debug;

use crate::context::Values;
use crate::errors::{Error, Result};
use crate::renderer::{Renderer, DEFAULT_ROW_SEPARATOR};
use crate::template::Template;

/// Main point of interaction in this library.
///
/// The `Engine` keeps the sources of the templates it loaded and the settings
/// used to render them. Nothing else is kept between renders.
///
/// ```rust,no_run
/// use ltpl::{Engine, Values};
///
/// let engine = Engine::new("templates/**/*.html").unwrap();
/// let mut values = Values::new();
/// values.insert("answer", "42");
/// let rendered = engine.render("answer.html", &values).unwrap();
/// ```
#[derive(Clone)]
pub struct Engine {
    // The glob used in `Engine::new`, None if Engine was instantiated differently
    glob: Option<String>,
    /// Loaded templates, by name
    #[doc(hidden)]
    pub templates: HashMap<String, Template>,
    row_separator: String,
    strict_blocks: bool,
}

impl Engine {
    fn create(dir: &str) -> Result<Engine> {
        if dir.find('*').is_none() {
            return Err(Error::msg(format!(
                "Engine expects a glob as input, no * were found in `{}`",
                dir
            )));
        }

        let mut engine = Engine { glob: Some(dir.to_string()), ..Engine::default() };
        engine.load_from_glob()?;
        Ok(engine)
    }

    /// Create a new instance of Engine, containing all the templates whose
    /// files match the glob provided.
    ///
    /// Template names are the paths relative to the directory before the
    /// first `*` of the glob, with `/` as separator:
    /// with `templates/**/*.html`, the file `templates/users/list.html` is
    /// named `users/list.html`.
    pub fn new(dir: &str) -> Result<Engine> {
        Self::create(dir)
    }

    /// Loads all the templates found in the glob that was given to Engine::new
    fn load_from_glob(&mut self) -> Result<()> {
        let glob = match self.glob {
            Some(ref g) => g.clone(),
            None => return Err(Error::msg("Engine can only load from glob if a glob is provided")),
        };

        // Raw templates have no path and are kept, every file is read again
        self.templates.retain(|_, t| t.path.is_none());

        let mut errors = String::new();

        // Need to canonicalize the glob path because globwalk always returns
        // an empty list for paths starting with `./` or `../`.
        let (parent_dir, glob_end) = glob.split_at(glob.find('*').unwrap_or(0));
        let parent_dir = match std::fs::canonicalize(parent_dir) {
            Ok(d) => d,
            // If canonicalize fails, just abort it and resume with the given path.
            Err(_) => PathBuf::from(parent_dir),
        };
        let dir = parent_dir.join(glob_end).to_string_lossy().into_owned();

        let walker = glob_builder(&dir)
            .follow_links(true)
            .build()
            .map_err(|e| Error::msg(format!("Invalid glob `{}`: {}", glob, e)))?;

        for entry in walker.filter_map(std::result::Result::ok) {
            let mut path = entry.into_path();
            // We only care about actual files
            if path.is_file() {
                if let Ok(stripped) = path.strip_prefix("./") {
                    path = stripped.to_path_buf();
                }

                let filepath = path
                    .strip_prefix(&parent_dir)
                    .unwrap_or(&path)
                    .to_string_lossy()
                    // change windows slash to forward slash
                    .replace('\\', "/");

                if let Err(e) = self.add_file(Some(filepath.as_str()), &path) {
                    use std::error::Error as StdError;

                    errors += &format!("\n* {}", e);
                    let mut cause = e.source();
                    while let Some(cause_err) = cause {
                        errors += &format!("\n{}", cause_err);
                        cause = cause_err.source();
                    }
                }
            }
        }

        if !errors.is_empty() {
            return Err(Error::msg(errors));
        }

        Ok(())
    }

    // Reads the file and adds it as a template, named after the path if no name is given
    fn add_file<P: AsRef<Path>>(&mut self, name: Option<&str>, path: P) -> Result<()> {
        let path = path.as_ref();
        let tpl_name = name.map(str::to_string).unwrap_or_else(|| path.to_string_lossy().into_owned());

        let mut f = File::open(path).map_err(|e| Error::io_error(e, path.display()))?;
        let mut input = String::new();
        f.read_to_string(&mut input).map_err(|e| Error::io_error(e, path.display()))?;

        let tpl = Template::new(&tpl_name, Some(path.to_string_lossy().into_owned()), &input)?;
        self.add_template(tpl)
    }

    fn add_template(&mut self, tpl: Template) -> Result<()> {
        if self.strict_blocks {
            tpl.validate_blocks()
                .map_err(|e| Error::chain(format!("Template '{}' has invalid blocks", tpl.name), e))?;
        }
        debug!("Loaded template '{}' ({} bytes)", tpl.name, tpl.source.len());
        self.templates.insert(tpl.name.clone(), tpl);
        Ok(())
    }

    /// Add a single template to the Engine.
    ///
    /// This will error if strict blocks are on and the template has invalid blocks.
    ///
    /// ```rust
    /// # use ltpl::Engine;
    /// let mut engine = Engine::default();
    /// engine.add_raw_template("new.html", "<p>{@body}</p>").unwrap();
    /// ```
    pub fn add_raw_template(&mut self, name: &str, content: &str) -> Result<()> {
        let tpl = Template::new(name, None, content)
            .map_err(|e| Error::chain(format!("Failed to parse '{}'", name), e))?;
        self.add_template(tpl)
    }

    /// Add all the templates given to the Engine.
    ///
    /// ```rust
    /// # use ltpl::Engine;
    /// let mut engine = Engine::default();
    /// engine.add_raw_templates(vec![
    ///     ("new.html", "<p>{@body}</p>"),
    ///     ("new2.html", "<ul>{@each:items}<li>{@n}</li>{@endeach:items}</ul>"),
    /// ]).unwrap();
    /// ```
    pub fn add_raw_templates<I, N, C>(&mut self, templates: I) -> Result<()>
    where
        I: IntoIterator<Item = (N, C)>,
        N: AsRef<str>,
        C: AsRef<str>,
    {
        for (name, content) in templates {
            self.add_raw_template(name.as_ref(), content.as_ref())?;
        }
        Ok(())
    }

    /// Add a single template from a path to the Engine. The default name for the template is
    /// the path given, but this can be renamed with the `name` parameter.
    ///
    /// ```rust,no_run
    /// # use ltpl::Engine;
    /// let mut engine = Engine::default();
    /// // Rename template with custom name
    /// engine.add_template_file("path/to/template.html", Some("template.html")).unwrap();
    /// // Use path as name
    /// engine.add_template_file("path/to/other.html", None).unwrap();
    /// ```
    pub fn add_template_file<P: AsRef<Path>>(&mut self, path: P, name: Option<&str>) -> Result<()> {
        self.add_file(name, path)
    }

    /// Add several templates from paths to the Engine.
    pub fn add_template_files<I, P, N>(&mut self, files: I) -> Result<()>
    where
        I: IntoIterator<Item = (P, Option<N>)>,
        P: AsRef<Path>,
        N: AsRef<str>,
    {
        for (path, name) in files {
            self.add_file(name.as_ref().map(|n| n.as_ref()), path)?;
        }
        Ok(())
    }

    /// Returns the template with the given name, or an error if it wasn't loaded
    pub fn get_template(&self, template_name: &str) -> Result<&Template> {
        match self.templates.get(template_name) {
            Some(tpl) => Ok(tpl),
            None => Err(Error::template_not_found(template_name)),
        }
    }

    /// Returns an iterator over the names of all registered templates in an
    /// unspecified order.
    pub fn get_template_names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(|s| s.as_str())
    }

    /// Renders an Engine template with the given values.
    ///
    /// A missing template is a `TemplateNotFound` error. A row list whose block is
    /// missing or malformed stops the render with an error for which
    /// [`Error::is_fatal`] is true.
    ///
    /// ```rust
    /// # use ltpl::{Engine, Values};
    /// let mut engine = Engine::default();
    /// engine.add_raw_template("answer.html", "<div>{@answer}</div>").unwrap();
    /// let mut values = Values::new();
    /// values.insert("answer", "42");
    /// assert_eq!(engine.render("answer.html", &values).unwrap(), "<div>42</div>");
    /// ```
    pub fn render(&self, template_name: &str, values: &Values) -> Result<String> {
        let template = self.get_template(template_name)?;
        debug!("Rendering template '{}' with {} value(s)", template.name, values.len());
        self.render_source(&template.source, values)
    }

    /// Reads the file at `path` and renders it, without adding it to the Engine.
    pub fn render_file<P: AsRef<Path>>(&self, path: P, values: &Values) -> Result<String> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| Error::io_error(e, path.display()))?;
        debug!("Rendering file {}", path.display());
        if self.strict_blocks {
            Template::new(&path.to_string_lossy(), None, &source)?.validate_blocks()?;
        }
        self.render_source(&source, values)
    }

    /// Renders a one off template (for example a template coming from a user
    /// input) with the Engine settings.
    pub fn render_str(&self, input: &str, values: &Values) -> Result<String> {
        if self.strict_blocks {
            Template::new("__render_str", None, input)?.validate_blocks()?;
        }
        self.render_source(input, values)
    }

    /// Renders a one off template with the default settings.
    ///
    /// ```rust
    /// # use ltpl::{Engine, Values};
    /// let mut values = Values::new();
    /// values.insert("greeting", "hello");
    /// Engine::one_off("{@greeting} world", &values).unwrap();
    /// ```
    pub fn one_off(input: &str, values: &Values) -> Result<String> {
        Engine::default().render_str(input, values)
    }

    fn render_source(&self, source: &str, values: &Values) -> Result<String> {
        Renderer::new(source, values).with_row_separator(&self.row_separator).render()
    }

    /// Text put between two rendered rows of a block, `"\n"` by default.
    ///
    /// ```rust
    /// # use ltpl::{Engine, Values, row};
    /// let mut engine = Engine::default();
    /// engine.set_row_separator("");
    /// let mut values = Values::new();
    /// values.insert("cells", vec![row! { "v" => 1 }, row! { "v" => 2 }]);
    /// let out = engine.render_str("<tr>{@each:cells}<td>{@v}</td>{@endeach:cells}</tr>", &values);
    /// assert_eq!(out.unwrap(), "<tr><td>1</td><td>2</td></tr>");
    /// ```
    pub fn set_row_separator(&mut self, separator: &str) {
        self.row_separator = separator.to_string();
    }

    /// Checks the blocks of every template added from now on: each `{@each:name}`
    /// needs a following `{@endeach:name}` and blocks can't be nested.
    /// Templates with invalid blocks are then refused when added instead of
    /// failing when rendered. Off by default.
    pub fn set_strict_blocks(&mut self, strict: bool) {
        self.strict_blocks = strict;
    }

    /// Re-parse all templates found in the glob given to Engine
    /// Use this when you are watching a directory and want to reload everything,
    /// for example when a file is added.
    ///
    /// If you are adding templates without using a glob, we can't know when a template
    /// is deleted, which would result in an error if we are trying to reload that file
    pub fn full_reload(&mut self) -> Result<()> {
        if self.glob.is_some() {
            self.load_from_glob()?;
        } else {
            return Err(Error::msg("Reloading is only available if you are using a glob"));
        }
        Ok(())
    }
}

impl Default for Engine {
    fn default() -> Engine {
        Engine {
            glob: None,
            templates: HashMap::new(),
            row_separator: DEFAULT_ROW_SEPARATOR.to_string(),
            strict_blocks: false,
        }
    }
}

// Needs a manual implementation since the template sources can be huge
impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Engine {{")?;
        writeln!(f, "\n\ttemplates: [")?;
        let mut names: Vec<&str> = self.get_template_names().collect();
        names.sort_unstable();
        for name in names {
            writeln!(f, "\t\t{},", name)?;
        }
        write!(f, "\t]")?;
        writeln!(f, "\n\trow_separator: {:?}", self.row_separator)?;
        writeln!(f, "\tstrict_blocks: {}", self.strict_blocks)?;
        write!(f, "}}")
    }
}
