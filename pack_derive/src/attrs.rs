use syn::{Field, Ident, LitStr, Result};

#[derive(Default)]
pub struct FieldAttrs {
    pub rename: Option<String>,
    pub skip: bool,
    // accepted for compatibility with the field-tag convention, does not affect naming
    #[allow(dead_code)]
    pub omitempty: bool,
}

impl FieldAttrs {
    pub fn parse(field: &Field) -> Result<FieldAttrs> {
        let mut out = FieldAttrs::default();
        for attr in field.attrs.iter().filter(|a| a.path().is_ident("pack")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    let name: LitStr = meta.value()?.parse()?;
                    out.rename = Some(name.value());
                    Ok(())
                } else if meta.path.is_ident("skip") {
                    out.skip = true;
                    Ok(())
                } else if meta.path.is_ident("omitempty") {
                    out.omitempty = true;
                    Ok(())
                } else {
                    Err(meta.error("expected `rename`, `skip` or `omitempty`"))
                }
            })?;
        }
        // "-" is the traditional spelling of skip
        if out.rename.as_deref() == Some("-") {
            out.skip = true;
        }
        Ok(out)
    }

    /// The name a field is written under.
    pub fn wire_name(&self, ident: &Ident) -> String {
        match &self.rename {
            Some(name) => name.clone(),
            None => ident.to_string(),
        }
    }
}
