use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

use crate::cmd::{build_registry, load_config, TypesArgs};
use crate::exit::{CliResult, SUCCESS};
use crate::output::{layout_name, print_json, OutputFormat};

#[derive(Serialize)]
struct TypeOutput {
    id: u8,
    name: String,
    layout: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    topic: Option<String>,
}

pub fn run(args: TypesArgs, format: OutputFormat) -> CliResult<i32> {
    let config = load_config(args.config.as_deref())?;
    let registry = build_registry(&config)?;

    let rows: Vec<TypeOutput> = registry
        .types()
        .into_iter()
        .map(|ty| TypeOutput {
            id: ty.id,
            name: ty.name.clone(),
            layout: layout_name(&ty.layout),
            topic: ty.topic.clone(),
        })
        .collect();

    match format {
        OutputFormat::Json => print_json(&rows),
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["ID", "NAME", "LAYOUT", "TOPIC"]);
            for row in &rows {
                table.add_row(vec![
                    row.id.to_string(),
                    row.name.clone(),
                    row.layout.clone(),
                    row.topic.clone().unwrap_or_default(),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty | OutputFormat::Raw => {
            for row in &rows {
                match &row.topic {
                    Some(topic) => println!("{} {} {} {}", row.id, row.name, row.layout, topic),
                    None => println!("{} {} {}", row.id, row.name, row.layout),
                }
            }
        }
    }

    Ok(SUCCESS)
}
