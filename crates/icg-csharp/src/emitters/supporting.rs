use minijinja::{Environment, ErrorKind, context};

use icg_core::GeneratedFile;
use icg_core::model::SupportingFile;

use super::Header;
use crate::generator::GeneratorError;

/// Render every supporting file the codegen kept after `process_opts`.
pub fn emit_supporting_files(
    env: &Environment<'_>,
    header: &Header,
    files: &[SupportingFile],
) -> Result<Vec<GeneratedFile>, GeneratorError> {
    files
        .iter()
        .map(|file| {
            let tmpl = env.get_template(&file.template).map_err(|err| match err.kind() {
                ErrorKind::TemplateNotFound => GeneratorError::MissingTemplate(file.template.clone()),
                _ => GeneratorError::Template(err),
            })?;
            let content = tmpl.render(context! {
                header => header,
                package_name => &header.package_name,
                destination => &file.destination_filename,
            })?;
            log::debug!("rendered supporting file {}", file.path());
            Ok(GeneratedFile {
                path: file.path(),
                content,
            })
        })
        .collect()
}
