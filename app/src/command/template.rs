use quickparse_core::Template;

/// Strategy for printing a starter pattern file to stdout.
#[derive(Debug, Clone, Copy)]
pub struct TemplateStrategy;

impl super::CommandStrategy for TemplateStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        print!("{}", Template::scaffold());
        Ok(())
    }
}
