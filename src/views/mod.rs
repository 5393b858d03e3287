use minijinja::Environment;

use crate::error::Result;

/// Server-rendered HTML views. The template sources are embedded at compile
/// time and registered once, at startup.
pub struct Views {
    env: Environment<'static>,
}

impl Views {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        let templates = [
            ("users_list", include_str!("templates/users_list.html")),
            ("users_form", include_str!("templates/users_form.html")),
            ("addresses_list", include_str!("templates/addresses_list.html")),
            ("addresses_form", include_str!("templates/addresses_form.html")),
        ];
        for (name, source) in templates {
            env.add_template(name, source)?;
        }
        Ok(Views { env })
    }

    pub fn render(&self, name: &str, ctx: minijinja::Value) -> Result<String> {
        let template = self.env.get_template(name)?;
        let html = template.render(ctx)?;
        Ok(html)
    }
}
