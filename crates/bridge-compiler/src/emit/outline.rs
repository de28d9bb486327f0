//! Plain-text renderer: a readable outline of what a real template set
//! would generate. Used for snapshots and by the CLI.

use std::fmt::Write;

use bridge_core::Colors;

use super::renderer::{
    ChildCodec, ClientContext, OperationContext, RenderError, Renderer, TypeContext,
};

#[derive(Clone, Debug)]
pub struct OutlineConfig {
    /// Indentation for nested lines
    pub(crate) indent: String,
    /// Print each child's signature next to its codec
    pub(crate) signatures: bool,
    pub(crate) colors: Colors,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            indent: "  ".to_string(),
            signatures: true,
            colors: Colors::OFF,
        }
    }
}

impl OutlineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn indent(mut self, value: impl Into<String>) -> Self {
        self.indent = value.into();
        self
    }

    pub fn signatures(mut self, value: bool) -> Self {
        self.signatures = value;
        self
    }

    pub fn colored(mut self, enabled: bool) -> Self {
        self.colors = Colors::new(enabled);
        self
    }
}

#[derive(Clone, Copy)]
enum Direction {
    Write,
    Read,
}

#[derive(Clone, Debug, Default)]
pub struct OutlineRenderer {
    config: OutlineConfig,
}

impl OutlineRenderer {
    pub fn new(config: OutlineConfig) -> Self {
        Self { config }
    }

    fn child(&self, dir: Direction, child: &ChildCodec, out: &mut String) -> std::fmt::Result {
        let c = self.config.colors;
        let indent = &self.config.indent;
        let codec = match dir {
            Direction::Write => child.writer(),
            Direction::Read => child.reader(),
        };
        let codec = codec.unwrap_or_else(|| "<none>".to_string());

        if child.embedded {
            write!(out, "{indent}embed")?;
        } else {
            write!(out, "{indent}{}", child.label)?;
        }
        if self.config.signatures {
            write!(out, " {}{}{}", c.blue, child.signature, c.reset)?;
        }
        write!(out, " {}via{} {codec}", c.dim, c.reset)?;
        if child.supplied {
            write!(out, " {}(supplied){}", c.dim, c.reset)?;
        }
        writeln!(out)
    }

    fn codec(
        &self,
        dir: Direction,
        name: &str,
        ctx: &TypeContext<'_>,
        out: &mut String,
    ) -> std::fmt::Result {
        let c = self.config.colors;
        writeln!(
            out,
            "func {name}({}{}{}) {}[{}]{}",
            c.blue, ctx.signature, c.reset, c.dim, ctx.family, c.reset
        )?;
        for child in &ctx.children {
            self.child(dir, child, out)?;
        }
        writeln!(out)
    }
}

impl Renderer for OutlineRenderer {
    fn client(&mut self, ctx: &ClientContext<'_>, out: &mut String) -> Result<(), RenderError> {
        let c = self.config.colors;
        let indent = &self.config.indent;
        writeln!(
            out,
            "type {}{}{} client for {}",
            c.blue,
            ctx.client_name,
            c.reset,
            ctx.registry.signature(ctx.service)
        )?;
        for op in ctx.operations {
            writeln!(
                out,
                "{indent}{}{}",
                op.name,
                ctx.registry.signature(op.function).trim_start_matches("func")
            )?;
        }
        Ok(())
    }

    fn operation(
        &mut self,
        ctx: &OperationContext<'_>,
        out: &mut String,
    ) -> Result<(), RenderError> {
        let c = self.config.colors;
        writeln!(
            out,
            "func (c *{}) {}{}{}",
            ctx.client_name, c.blue, ctx.operation.name, c.reset
        )?;
        for input in &ctx.inputs {
            self.child(Direction::Write, input, out)?;
        }
        for output in &ctx.outputs {
            self.child(Direction::Read, output, out)?;
        }
        writeln!(out)?;
        Ok(())
    }

    fn writer(&mut self, ctx: &TypeContext<'_>, out: &mut String) -> Result<(), RenderError> {
        Ok(self.codec(Direction::Write, &ctx.writer, ctx, out)?)
    }

    fn reader(&mut self, ctx: &TypeContext<'_>, out: &mut String) -> Result<(), RenderError> {
        Ok(self.codec(Direction::Read, &ctx.reader, ctx, out)?)
    }
}
