//! Runs a parsed command against the configured collaborators.

use std::fs;
use std::io::Write;
use std::path::Path;

use acl::{
    AccessQuery, AclSource, DumpSource, GetfaclSource, GroupMembership, MatchMode, PathOps,
    StaticGroups, SystemGroups, SystemPaths, Tracer, TracingDiagnostics, ensure_path_operand,
};
use is_terminal::IsTerminal;

use crate::arguments::{Action, ColorChoice, OutputFormat, ParsedArgs, QueryArgs};
use crate::error::CliError;
use crate::render::{
    self, HasReport, ShowReport, TraceReport, navigation_verdict, numbered_leaf, trace_verdict,
    write_json, write_levels, write_record,
};

/// Output settings resolved from the global options.
#[derive(Clone, Copy, Debug)]
struct Output {
    color: bool,
    format: OutputFormat,
}

impl Output {
    fn new(color: ColorChoice, format: OutputFormat) -> Self {
        let color = match color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => std::io::stdout().is_terminal(),
        };
        Self {
            color: color && format == OutputFormat::Text,
            format,
        }
    }
}

fn acl_source(parsed: &ParsedArgs) -> Result<Box<dyn AclSource>, CliError> {
    if let Some(path) = &parsed.from_dump {
        let text = fs::read_to_string(path).map_err(|source| CliError::Dump {
            path: path.clone(),
            source,
        })?;
        let dump = DumpSource::from_dump(&text, &TracingDiagnostics);
        logging::trace_source!(
            records = dump.len(),
            dump = %path.display(),
            "loaded ACL dump"
        );
        return Ok(Box::new(dump));
    }

    Ok(Box::new(
        parsed
            .getfacl
            .clone()
            .map_or_else(GetfaclSource::new, GetfaclSource::with_program),
    ))
}

/// Parses `USER=GROUP[,GROUP...]` specs into fixed memberships.
pub(crate) fn static_groups(specs: &[String]) -> Result<StaticGroups, CliError> {
    specs.iter().try_fold(StaticGroups::new(), |groups, spec| {
        let (user, list) = spec
            .split_once('=')
            .filter(|(user, _)| !user.trim().is_empty())
            .ok_or_else(|| CliError::GroupSpec(spec.clone()))?;
        let names = list
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_owned)
            .collect::<Vec<_>>();
        Ok(groups.with_user(user.trim(), names))
    })
}

fn group_membership(parsed: &ParsedArgs) -> Result<Box<dyn GroupMembership>, CliError> {
    if parsed.groups.is_empty() {
        Ok(Box::new(SystemGroups))
    } else {
        Ok(Box::new(static_groups(&parsed.groups)?))
    }
}

fn build_query(args: &QueryArgs) -> Result<AccessQuery, CliError> {
    ensure_path_operand(&args.path)?;
    let mode: MatchMode = args.mode.parse()?;
    Ok(AccessQuery::parse(&args.acl, mode)?)
}

enum Request<'p> {
    Trace(&'p QueryArgs, AccessQuery),
    Has(&'p QueryArgs, AccessQuery),
    Show(&'p Path),
}

pub(crate) fn execute<W: Write>(parsed: &ParsedArgs, stdout: &mut W) -> Result<(), CliError> {
    let output = Output::new(parsed.color, parsed.format);

    // Malformed queries are rejected before any collaborator is consulted.
    let request = match &parsed.action {
        Action::Trace(args) => Request::Trace(args, build_query(args)?),
        Action::Has(args) => Request::Has(args, build_query(args)?),
        Action::Show { path } => Request::Show(path),
    };

    let source = acl_source(parsed)?;
    let groups = group_membership(parsed)?;
    let paths = SystemPaths;
    let tracer = Tracer::new(source.as_ref(), groups.as_ref(), &paths);

    match request {
        Request::Trace(args, query) => run_trace(&tracer, args, &query, output, stdout),
        Request::Has(args, query) => run_has(&tracer, args, &query, output, stdout),
        Request::Show(path) => run_show(&tracer, &paths, path, output, stdout),
    }
}

fn run_trace<W: Write>(
    tracer: &Tracer<'_>,
    args: &QueryArgs,
    query: &AccessQuery,
    output: Output,
    stdout: &mut W,
) -> Result<(), CliError> {
    let trace = tracer.trace(&args.path, query)?;
    let granted = trace.is_permitted();

    match output.format {
        OutputFormat::Json => write_json(
            stdout,
            &TraceReport {
                path: &args.path,
                query,
                granted,
                trace: &trace,
            },
        )?,
        OutputFormat::Text => {
            write_levels(stdout, &trace, output.color)?;
            writeln!(
                stdout,
                "{}",
                trace_verdict(query, &args.acl, &args.path, granted)
            )?;
        }
    }
    Ok(())
}

fn run_has<W: Write>(
    tracer: &Tracer<'_>,
    args: &QueryArgs,
    query: &AccessQuery,
    output: Output,
    stdout: &mut W,
) -> Result<(), CliError> {
    let navigation = tracer.navigate(&args.path, query)?;

    match output.format {
        OutputFormat::Json => write_json(
            stdout,
            &HasReport {
                path: &args.path,
                query,
                can_navigate: navigation.can_navigate(),
                has_permission: navigation.has_permission(),
                granted: navigation.is_granted(),
                traversal: &navigation.traversal,
                leaf: &navigation.leaf,
            },
        )?,
        OutputFormat::Text => {
            let leaf = numbered_leaf(&navigation);
            write_levels(
                stdout,
                navigation.traversal.iter().chain(std::iter::once(&leaf)),
                output.color,
            )?;
            writeln!(
                stdout,
                "{}",
                navigation_verdict(query, &args.acl, &args.path, &navigation)
            )?;
        }
    }
    Ok(())
}

fn run_show<W: Write>(
    tracer: &Tracer<'_>,
    paths: &dyn PathOps,
    path: &Path,
    output: Output,
    stdout: &mut W,
) -> Result<(), CliError> {
    let absolute = paths.to_absolute(path);
    let record = tracer.record_for(&absolute);

    match output.format {
        OutputFormat::Json => write_json(
            stdout,
            &ShowReport {
                path: &absolute,
                record: &record,
            },
        )?,
        OutputFormat::Text => {
            if record.is_empty() {
                writeln!(stdout, "{} {}", render::NO_ACL, absolute.display())?;
            } else {
                write_record(stdout, &record)?;
            }
        }
    }
    Ok(())
}
