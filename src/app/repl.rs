use crate::app::render;
use crate::app::view::AnalysisSession;
use crate::core::keywords::parse_keyword_list;
use crate::domain::model::{DetailCategory, SortDirection, SortMetric, SortSpec};
use crate::utils::error::{AnalyzerError, Result};
use std::io::{BufRead, Write};

const HELP: &str = "\
Commands:
  analyze <kw>[, <kw>...]       analyze keywords (commas separate keywords)
  sort <metric> [asc|desc]      sort by prefix, suffix, substring or total
  unsort                        restore keyword input order
  detail <row|keyword> <cat>    toggle matches for prefix, suffix, substring or total
  show                          print the table again
  help                          show this message
  quit                          leave the session";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Analyze(Vec<String>),
    Sort(SortMetric, Option<SortDirection>),
    Unsort,
    Detail(RowRef, DetailCategory),
    Show,
    Help,
    Quit,
}

// 列號從 1 開始
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowRef {
    Number(usize),
    Keyword(String),
}

fn command_error(message: impl Into<String>) -> AnalyzerError {
    AnalyzerError::CommandError {
        message: message.into(),
    }
}

pub fn parse_command(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };

    let command = match name.to_ascii_lowercase().as_str() {
        // 逗號在單行輸入中等同換行
        "analyze" | "a" => Command::Analyze(parse_keyword_list(&rest.replace(',', "\n"))),
        "sort" | "s" => {
            let mut parts = rest.split_whitespace();
            let metric = parts
                .next()
                .ok_or_else(|| command_error("sort needs a metric"))?
                .parse::<SortMetric>()
                .map_err(command_error)?;
            let direction = parts
                .next()
                .map(str::parse::<SortDirection>)
                .transpose()
                .map_err(command_error)?;
            Command::Sort(metric, direction)
        }
        "unsort" => Command::Unsort,
        "detail" | "d" => {
            // 關鍵字可能含空白，類別永遠是最後一個詞
            let (row, category) = rest
                .rsplit_once(char::is_whitespace)
                .ok_or_else(|| command_error("usage: detail <row|keyword> <category>"))?;
            let category = category.parse::<DetailCategory>().map_err(command_error)?;
            let row = row.trim();
            let row = match row.parse::<usize>() {
                Ok(number) => RowRef::Number(number),
                Err(_) => RowRef::Keyword(row.to_string()),
            };
            Command::Detail(row, category)
        }
        "show" | "table" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(command_error(format!("unknown command '{}'", other))),
    };
    Ok(Some(command))
}

fn resolve_row(session: &AnalysisSession, row: &RowRef) -> Result<usize> {
    match row {
        RowRef::Number(0) => Err(command_error("rows are numbered from 1")),
        RowRef::Number(number) => Ok(number - 1),
        RowRef::Keyword(keyword) => session
            .find_row(keyword)
            .ok_or_else(|| command_error(format!("no row for keyword '{}'", keyword))),
    }
}

/// Applies one command. Returns `false` when the session should end.
pub fn execute<W: Write>(session: &mut AnalysisSession, command: Command, out: &mut W) -> Result<bool> {
    match command {
        Command::Analyze(keywords) => {
            session.analyze_keywords(keywords);
            render::render_table(out, session.results(), session.sort())?;
        }
        Command::Sort(metric, direction) => {
            match direction {
                Some(direction) => session.set_sort(Some(SortSpec::new(metric, direction))),
                None => {
                    session.sort_by(metric);
                }
            }
            render::render_table(out, session.results(), session.sort())?;
        }
        Command::Unsort => {
            session.set_sort(None);
            render::render_table(out, session.results(), session.sort())?;
        }
        Command::Detail(row, category) => {
            let row = resolve_row(session, &row)?;
            match session.toggle_detail(row, category)? {
                Some(view) => render::render_detail(out, &view)?,
                None => writeln!(out, "Detail closed.")?,
            }
        }
        Command::Show => {
            render::render_table(out, session.results(), session.sort())?;
            if let Some(view) = session.open_detail() {
                render::render_detail(out, &view)?;
            }
        }
        Command::Help => writeln!(out, "{}", HELP)?,
        Command::Quit => return Ok(false),
    }
    Ok(true)
}

// 錯誤指令只回報，不中斷迴圈
pub fn run_session<R: BufRead, W: Write>(
    session: &mut AnalysisSession,
    input: R,
    out: &mut W,
) -> Result<()> {
    write!(out, "> ")?;
    out.flush()?;

    for line in input.lines() {
        let line = line?;
        let keep_going = match parse_command(&line) {
            Ok(Some(command)) => execute(session, command, out),
            Ok(None) => Ok(true),
            Err(e) => Err(e),
        };

        match keep_going {
            Ok(true) => {}
            Ok(false) => return Ok(()),
            Err(e @ AnalyzerError::CommandError { .. }) => {
                tracing::debug!("Rejected command '{}': {}", line.trim(), e);
                writeln!(out, "❌ {}", e.user_friendly_message())?;
            }
            Err(e) => return Err(e),
        }

        write!(out, "> ")?;
        out.flush()?;
    }
    Ok(())
}
