use std::{env, fs::read_to_string, process::exit, time::Instant};

use akbit_lang::ast::ast::{Node, NodeKind};
use akbit_lang::compile_unit;
use akbit_lang::errors::errors::Error;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() != 2 {
        eprintln!("usage: akbit <file>");
        exit(1);
    }

    let file_path: &str = &args[1];
    let source = match read_to_string(file_path) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Failed to read {}: {}", file_path, error);
            exit(1);
        }
    };

    let start = Instant::now();

    match compile_unit(&source) {
        Ok(unit) => {
            println!("Compiled in {:?}", start.elapsed());

            for diagnostic in &unit.diagnostics {
                println!("Warning: {}", diagnostic);
            }

            dump_ast(&unit.module, 0);
        }
        Err(error) => {
            display_error(&error, file_path, &source);
            exit(1);
        }
    }
}

fn display_error(error: &Error, file: &str, source: &str) {
    /*
        Error: UnexpectedToken (<value> expected, but <equal(=)> was given)
        -> final.ak
           |
        20 | let a = =
           | --------^
    */

    println!("Error: {} ({})", error.get_error_name(), error.get_kind());

    let position = error.get_position();
    if position.is_null() {
        return;
    }

    let line_text = source
        .lines()
        .nth(position.line as usize - 1)
        .unwrap_or("");
    let (line_text, removed_whitespace) = remove_starting_whitespace(line_text);

    let line_str = position.line.to_string();
    let padding = line_str.len() + 2;
    let arrows = (position.column as usize).saturating_sub(removed_whitespace).max(1);

    println!("-> {}", file);
    println!("{:>padding$}", "|");
    println!("{} | {}", line_str, line_text.trim_end());
    println!("{:>padding$} {:->arrows$}", "|", "^");
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}

/// Prints the annotated tree, one node per line: kind, detail, result type
/// and the id of the scope the node was annotated in.
fn dump_ast(node: &Node, depth: usize) {
    let indent = "  ".repeat(depth);

    let mut label = String::from(node.kind.name());
    match &node.kind {
        NodeKind::Declaration { name, .. } => {
            label.push_str(&format!(" '{}'", name));
        }
        NodeKind::ValueVariable { name, .. } => {
            label.push_str(&format!(" '{}'", name));
        }
        NodeKind::UnaryOperation { operation, .. } => {
            label.push_str(&format!(" '{}'", operation));
        }
        NodeKind::BinaryOperation { operation, .. } => {
            label.push_str(&format!(" '{}'", operation));
        }
        NodeKind::ValueString(value) => label.push_str(&format!(" {:?}", value)),
        NodeKind::ValueCharacter(value) => label.push_str(&format!(" {:?}", value)),
        NodeKind::ValueInteger(value) => label.push_str(&format!(" {}", value)),
        NodeKind::ValueDecimal(value) => label.push_str(&format!(" {}", value)),
        _ => {}
    }

    match node.scope() {
        Some(scope) => println!(
            "{}{} : {} [scope {}]",
            indent,
            label,
            node.result_type,
            scope.borrow().id
        ),
        None => println!("{}{} : {}", indent, label, node.result_type),
    }

    match &node.kind {
        NodeKind::Unknown => {}
        NodeKind::Module { items, .. } => {
            for item in items {
                dump_ast(item, depth + 1);
            }
        }
        NodeKind::Declaration {
            declared_type,
            value,
            ..
        } => {
            if let Some(declared_type) = declared_type {
                dump_ast(declared_type, depth + 1);
            }
            if let Some(value) = value {
                dump_ast(value, depth + 1);
            }
        }
        NodeKind::Condition {
            expression,
            clause_true,
            clause_false,
        } => {
            dump_ast(expression, depth + 1);
            dump_ast(clause_true, depth + 1);
            if let Some(clause_false) = clause_false {
                dump_ast(clause_false, depth + 1);
            }
        }
        NodeKind::Block { code } => {
            for statement in code {
                dump_ast(statement, depth + 1);
            }
        }
        NodeKind::UnaryOperation { expression, .. } => dump_ast(expression, depth + 1),
        NodeKind::BinaryOperation { operands, .. } => {
            for operand in operands {
                dump_ast(operand, depth + 1);
            }
        }
        NodeKind::FunctionCall {
            expression,
            arguments,
        } => {
            dump_ast(expression, depth + 1);
            dump_ast(arguments, depth + 1);
        }
        NodeKind::ValueFunction {
            parameters, body, ..
        } => {
            for parameter in parameters {
                dump_ast(parameter, depth + 1);
            }
            dump_ast(body, depth + 1);
        }
        NodeKind::ValueTuple { entries } => {
            for entry in entries {
                dump_ast(entry, depth + 1);
            }
        }
        NodeKind::ValueString(_)
        | NodeKind::ValueCharacter(_)
        | NodeKind::ValueInteger(_)
        | NodeKind::ValueDecimal(_)
        | NodeKind::ValueVariable { .. } => {}
    }
}
