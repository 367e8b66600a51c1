//
// ──────────────────────────────────────────────────────────────────────────────
//  PUBLICATION
// ──────────────────────────────────────────────────────────────────────────────
//
// Two shapes of the same extraction result are handed to the host build tool:
//
//   define values   { "__GIT_REVISION_INFO__": "<json>" }
//   inline script   const <customVar> = <json>;
//                   console.log(<json>);        (only with consoleDirectly)
//
// The script is wrapped in an HtmlTagDescriptor that asks the host to add a
// deferred <script> tag to the end of <body>.
//

use std::collections::BTreeMap;

use minijinja::{Environment, context};
use revision_errors::{RenderSnafu, Result, SerializeSnafu};
use serde::Serialize;

use crate::resolver::ExtractionResult;

/// Name of the global define carrying the serialized result.
pub const DEFINE_KEY: &str = "__GIT_REVISION_INFO__";

const INLINE_SCRIPT_TEMPLATE: &str = "const {{ custom_var }} = {{ data }};\n\
{%- if console_directly %}\nconsole.log({{ data }});{% endif %}";

pub fn serialize_result(data: &ExtractionResult) -> Result<String> {
    data.to_json().map_err(|err| {
        SerializeSnafu {
            message: err.to_string(),
        }
        .build()
    })
}

/// Global define values for the bundled output.
pub fn define_values(data: &ExtractionResult) -> Result<BTreeMap<String, String>> {
    Ok(BTreeMap::from([(DEFINE_KEY.to_string(), serialize_result(data)?)]))
}

/// Renders the assignment (and optional console print) for `data`.
pub fn inline_script(
    custom_var: &str,
    data: &ExtractionResult,
    console_directly: bool,
) -> Result<String> {
    let json = serialize_result(data)?;
    let render_err = |err: minijinja::Error| {
        RenderSnafu {
            message: err.to_string(),
        }
        .build()
    };

    let mut env = Environment::new();
    env.add_template("inline_script", INLINE_SCRIPT_TEMPLATE)
        .map_err(render_err)?;
    let tmpl = env.get_template("inline_script").map_err(render_err)?;

    tmpl.render(context! {
        custom_var => custom_var,
        data => json,
        console_directly => console_directly,
    })
    .map_err(render_err)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InjectTo {
    Head,
    Body,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptAttrs {
    pub defer: bool,
}

/// A tag for the host to inject into the HTML document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HtmlTagDescriptor {
    pub tag: String,
    pub attrs: ScriptAttrs,
    pub children: String,
    pub inject_to: InjectTo,
}

impl HtmlTagDescriptor {
    /// A `<script defer>` appended to the body.
    pub fn deferred_script(children: String) -> Self {
        Self {
            tag: "script".to_string(),
            attrs: ScriptAttrs { defer: true },
            children,
            inject_to: InjectTo::Body,
        }
    }

    /// Plain HTML rendering, for hosts that splice text themselves.
    pub fn to_html(&self) -> String {
        let defer = if self.attrs.defer { " defer" } else { "" };
        format!("<{tag}{defer}>{}</{tag}>", self.children, tag = self.tag)
    }
}
