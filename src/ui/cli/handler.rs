// Sat Jan 24 2026 - Alex

use super::args::{Command, FoldArgs, ResolveArgs, UnitArgs};
use crate::config::Config;
use crate::graph::{Dialect, Record, RecordParser, RecordWriter};
use crate::pipeline::{Folder, Normalizer, Pipeline, Pruner, Resolver};
use crate::utils::{read_input, read_inputs};
use std::io::Write;

pub struct CommandHandler {
    config: Config,
}

impl CommandHandler {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Runs a command and writes its graph to `out`. Output is only written
    /// once the whole command succeeded, so a fatal error leaves `out` empty.
    pub fn execute_to<W: Write>(&self, command: &Command, out: &mut W) -> anyhow::Result<()> {
        self.config.validate()?;

        let (dialect, records) = match command {
            Command::Prune(args) => (Dialect::Raw, self.handle_prune(args)?),
            Command::Normalize(args) => (Dialect::Labeled, self.handle_normalize(args)?),
            Command::Fold(args) => (Dialect::Labeled, self.handle_fold(args)?),
            Command::Resolve(args) => (Dialect::Labeled, self.handle_resolve(args)?),
            Command::Run(args) => (Dialect::Labeled, self.handle_run(args)?),
        };

        self.writer(dialect).write_to(out, &records)?;
        out.flush()?;
        Ok(())
    }

    fn writer(&self, dialect: Dialect) -> RecordWriter {
        let writer = RecordWriter::new(dialect);
        if self.config.wrap_output {
            writer.wrapped(self.config.graph_name.as_str())
        } else {
            writer
        }
    }

    fn handle_prune(&self, args: &UnitArgs) -> anyhow::Result<Vec<Record>> {
        args.validate().map_err(|e| anyhow::anyhow!(e))?;
        let text = read_input(&args.input)?;

        let pruner = Pruner::new().with_external_label(self.config.external_node_label.as_str());
        let unit = pruner.prune(&RecordParser::raw().parse_document(&text))?;
        log::info!(
            "Pruned {}: {} nodes, {} edges kept",
            args.input.display(),
            unit.nodes.len(),
            unit.edges.len()
        );
        Ok(unit.to_records())
    }

    fn handle_normalize(&self, args: &UnitArgs) -> anyhow::Result<Vec<Record>> {
        args.validate().map_err(|e| anyhow::anyhow!(e))?;
        let text = read_input(&args.input)?;

        let mut normalizer = Normalizer::new();
        let unit = normalizer.normalize(&RecordParser::raw().parse_document(&text))?;
        log::debug!("Mapped {} node ids to labels", normalizer.mapped_count());
        Ok(unit.records)
    }

    fn handle_fold(&self, args: &FoldArgs) -> anyhow::Result<Vec<Record>> {
        args.validate().map_err(|e| anyhow::anyhow!(e))?;
        let units = read_inputs(&args.inputs)?;

        let parser = RecordParser::labeled();
        let mut folder = Folder::new();
        for unit in &units {
            log::debug!("Folding {}", unit.name);
            folder.add_records(&parser.parse_document(&unit.text));
        }

        let folded = folder.finish();
        folded.stats().log();
        Ok(folded.to_records())
    }

    fn handle_resolve(&self, args: &ResolveArgs) -> anyhow::Result<Vec<Record>> {
        args.validate().map_err(|e| anyhow::anyhow!(e))?;
        let config = self.resolve_config(args)?;
        let units = read_inputs(&args.inputs)?;

        let parser = RecordParser::labeled();
        let records: Vec<Record> = units
            .iter()
            .flat_map(|unit| parser.parse_document(&unit.text))
            .collect();

        let crates = Resolver::from_config(&config)?.resolve(&records);
        crates.stats().log();
        Ok(crates.to_records(config.emit_counts))
    }

    fn handle_run(&self, args: &ResolveArgs) -> anyhow::Result<Vec<Record>> {
        args.validate().map_err(|e| anyhow::anyhow!(e))?;
        let config = self.resolve_config(args)?;
        let units = read_inputs(&args.inputs)?;

        let output = Pipeline::new(&config)?.run(&units)?;
        Ok(output.crates.to_records(config.emit_counts))
    }

    /// Command line flags win over the loaded configuration.
    fn resolve_config(&self, args: &ResolveArgs) -> anyhow::Result<Config> {
        let mut config = self.config.clone();
        if let Some(pattern) = &args.crate_pattern {
            config = config.with_crate_pattern(pattern.as_str());
        }
        if args.counts {
            config = config.with_emit_counts(true);
        }
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    const RAW_UNIT: &str = concat!(
        "digraph \"Call graph\" {\n",
        "\tlabel=\"Call graph\";\n",
        "\tNode0x1 [shape=record,label=\"{external node}\"];\n",
        "\tNode0x1 -> Node0x2;\n",
        "\tNode0x2 [shape=record,label=\"{pkgA::foo}\"];\n",
        "\tNode0x3 [shape=record,label=\"{pkgB::bar}\"];\n",
        "\tNode0x2 -> Node0x3;\n",
        "\tNode0x3 -> Node0x0;\n",
        "}\n",
    );

    fn write_temp(text: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file
    }

    fn handler() -> CommandHandler {
        CommandHandler::new(Config::new().with_crate_pattern(r"([A-Za-z_][A-Za-z0-9_]*)::"))
    }

    fn execute(handler: &CommandHandler, command: Command) -> anyhow::Result<String> {
        let mut out = Vec::new();
        handler.execute_to(&command, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    fn resolve_args(inputs: Vec<PathBuf>, counts: bool) -> ResolveArgs {
        ResolveArgs {
            inputs,
            crate_pattern: None,
            counts,
        }
    }

    #[test]
    fn test_prune_command() {
        let file = write_temp(RAW_UNIT);
        let output = execute(
            &handler(),
            Command::Prune(UnitArgs {
                input: file.path().to_path_buf(),
            }),
        )
        .unwrap();

        assert_eq!(
            output,
            concat!(
                "Node0x2 [shape=record,label=\"{pkgA::foo}\",ext=\"{True}\",null=\"{False}\"];\n",
                "Node0x3 [shape=record,label=\"{pkgB::bar}\",ext=\"{False}\",null=\"{True}\"];\n",
                "Node0x2 -> Node0x3;\n",
            )
        );
    }

    #[test]
    fn test_stages_chained_through_files() {
        let raw = write_temp(RAW_UNIT);
        let handler = handler();

        let pruned = execute(
            &handler,
            Command::Prune(UnitArgs {
                input: raw.path().to_path_buf(),
            }),
        )
        .unwrap();
        let pruned_file = write_temp(&pruned);

        let normalized = execute(
            &handler,
            Command::Normalize(UnitArgs {
                input: pruned_file.path().to_path_buf(),
            }),
        )
        .unwrap();
        assert!(normalized.contains("\"pkgA::foo\" -> \"pkgB::bar\";"));
        let normalized_file = write_temp(&normalized);

        let folded = execute(
            &handler,
            Command::Fold(FoldArgs {
                inputs: vec![normalized_file.path().to_path_buf()],
            }),
        )
        .unwrap();
        let folded_file = write_temp(&folded);

        let resolved = execute(
            &handler,
            Command::Resolve(resolve_args(vec![folded_file.path().to_path_buf()], false)),
        )
        .unwrap();
        assert_eq!(resolved, "\"pkgA\";\n\"pkgB\";\n\"pkgA\" -> \"pkgB\";\n");

        let run_output = execute(
            &handler,
            Command::Run(resolve_args(vec![raw.path().to_path_buf()], false)),
        )
        .unwrap();
        assert_eq!(run_output, resolved);
    }

    #[test]
    fn test_run_with_counts_and_wrap() {
        let raw = write_temp(RAW_UNIT);
        let handler = CommandHandler::new(
            Config::new()
                .with_crate_pattern(r"([A-Za-z_][A-Za-z0-9_]*)::")
                .with_wrap_output(true),
        );
        let output = execute(
            &handler,
            Command::Run(resolve_args(vec![raw.path().to_path_buf()], true)),
        )
        .unwrap();

        assert_eq!(
            output,
            concat!(
                "digraph \"Call graph\" {\n",
                "\t\"pkgA\" [functions=\"{1}\"];\n",
                "\t\"pkgB\" [functions=\"{1}\"];\n",
                "\t\"pkgA\" -> \"pkgB\" [occurrences=\"{1}\"];\n",
                "}\n",
            )
        );
    }

    #[test]
    fn test_custom_external_label() {
        let raw = write_temp(concat!(
            "Node0x1 [shape=record,label=\"{<root>}\"];\n",
            "Node0x2 [shape=record,label=\"{pkgA::foo}\"];\n",
            "Node0x1 -> Node0x2;\n",
        ));
        let handler = CommandHandler::new(
            Config::new()
                .with_crate_pattern(r"([A-Za-z_][A-Za-z0-9_]*)::")
                .with_external_node_label("<root>"),
        );
        let output = execute(
            &handler,
            Command::Prune(UnitArgs {
                input: raw.path().to_path_buf(),
            }),
        )
        .unwrap();

        assert_eq!(
            output,
            "Node0x2 [shape=record,label=\"{pkgA::foo}\",ext=\"{True}\",null=\"{False}\"];\n"
        );
    }

    #[test]
    fn test_empty_external_label_rejected() {
        let raw = write_temp(RAW_UNIT);
        let handler = CommandHandler::new(Config::new().with_external_node_label("  "));
        let command = Command::Prune(UnitArgs {
            input: raw.path().to_path_buf(),
        });
        let mut out = Vec::new();
        assert!(handler.execute_to(&command, &mut out).is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn test_crate_pattern_flag_overrides_config() {
        let folded = write_temp("\"left.f\" [nodes=\"{1}\"];\n\"right.g\" [nodes=\"{1}\"];\n\"left.f\" -> \"right.g\";\n");
        let args = ResolveArgs {
            inputs: vec![folded.path().to_path_buf()],
            crate_pattern: Some(r"^(\w+)\.".to_string()),
            counts: false,
        };
        let output = execute(&handler(), Command::Resolve(args)).unwrap();
        assert_eq!(output, "\"left\";\n\"right\";\n\"left\" -> \"right\";\n");
    }

    #[test]
    fn test_missing_input_fails_without_output() {
        let present = write_temp(RAW_UNIT);
        let command = Command::Run(resolve_args(
            vec![present.path().to_path_buf(), PathBuf::from("/nonexistent/unit.graph")],
            false,
        ));

        let mut out = Vec::new();
        let err = handler().execute_to(&command, &mut out).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
        assert!(out.is_empty());
    }

    #[test]
    fn test_fatal_pipeline_error_fails_without_output() {
        let bad = write_temp("Node0x1 [shape=record,label=\"{f}\"];\nNode0x1 -> Node0x2;\nNode0x1 -> Node0x3;\n");
        let mut out = Vec::new();
        let result = handler().execute_to(
            &Command::Prune(UnitArgs {
                input: bad.path().to_path_buf(),
            }),
            &mut out,
        );
        assert!(result.is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let raw = write_temp(RAW_UNIT);
        let args = ResolveArgs {
            inputs: vec![raw.path().to_path_buf()],
            crate_pattern: Some("(unclosed".to_string()),
            counts: false,
        };
        assert!(execute(&handler(), Command::Run(args)).is_err());
    }
}
