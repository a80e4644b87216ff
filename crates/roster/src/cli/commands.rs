use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rosterapp::attributes::{ArtifactPayload, SearchInput};
use rosterapp::init::RosterContext;
use rosterapp::model::{DefinitionPatch, DefinitionRequest, NewOwner};
use rosterapp::paginate::PageState;

use super::render;
use super::setup::{
    ColumnCommands, Commands, FieldCommands, GridArgs, PagingArgs, PersonArgs, PersonCommands,
    ValueCommands,
};

pub fn dispatch(ctx: &mut RosterContext, command: Commands) -> Result<()> {
    match command {
        Commands::Person(cmd) => person(ctx, cmd),
        Commands::Field(cmd) => field(ctx, cmd),
        Commands::Value(cmd) => value(ctx, cmd),
        Commands::Grid(args) => grid(ctx, args),
        Commands::Columns(cmd) => columns(ctx, cmd),
        Commands::Config => {
            for (key, value) in ctx.config.entries() {
                println!("{} = {}", key, value);
            }
            println!("data_dir = {}", ctx.data_dir.display());
            Ok(())
        }
        Commands::Doctor => {
            let report = ctx.api.doctor()?;
            println!(
                "Removed {} orphaned value(s), repaired {} id sequence(s)",
                report.removed_orphan_values, report.fixed_sequences
            );
            Ok(())
        }
    }
}

/// Page state for a 1-based `--page`, clamped to the available pages.
fn page_state(paging: &PagingArgs, default_size: usize, total_items: usize) -> PageState {
    let mut state = PageState::new(paging.page_size.unwrap_or(default_size));
    let total_pages = total_items.div_ceil(state.page_size()).max(1);
    state.go_to(paging.page.saturating_sub(1), total_pages);
    state
}

fn person(ctx: &mut RosterContext, cmd: PersonCommands) -> Result<()> {
    match cmd {
        PersonCommands::Add(args) => {
            let owner = ctx.api.create_owner(new_owner(args))?;
            println!("Registered {} as #{}", owner.full_name, owner.id);
        }
        PersonCommands::List => {
            let owners = ctx.api.list_owners()?;
            if owners.is_empty() {
                println!("No people registered");
            } else {
                println!("{}", render::owners(&owners));
            }
        }
        PersonCommands::Show { id } => {
            let owner = ctx.api.get_owner(id)?;
            let values = ctx.api.list_values(id)?;
            let definitions = ctx.api.list_definitions(false)?;
            println!("{}", render::owner_detail(&owner));
            if !values.is_empty() {
                println!("\n{}", render::values(&values, &definitions));
            }
            let missing = ctx.api.missing_required(id)?;
            if !missing.is_empty() {
                let names: Vec<_> = missing.iter().map(|d| d.name.as_str()).collect();
                println!("\nMissing required: {}", names.join(", "));
            }
        }
        PersonCommands::Rm { id } => {
            let deleted = ctx.api.delete_owner(id)?;
            println!(
                "Deleted {} (#{}) and {} value(s)",
                deleted.owner.full_name, deleted.owner.id, deleted.removed_values
            );
        }
    }
    Ok(())
}

fn new_owner(args: PersonArgs) -> NewOwner {
    NewOwner {
        full_name: args.full_name,
        email: args.email,
        phone: args.phone,
        address: args.address,
        date_of_birth: args.birth,
        gender: args.gender,
        document_type: args.doc_type,
        document_number: args.doc_number,
        is_active: Some(!args.inactive),
        notes: args.notes,
    }
}

fn field(ctx: &mut RosterContext, cmd: FieldCommands) -> Result<()> {
    match cmd {
        FieldCommands::Add {
            name,
            kind,
            required,
            inactive,
        } => {
            let request = DefinitionRequest::new(name, kind)
                .required(required)
                .active(!inactive);
            let def = ctx.api.create_definition(&request)?;
            println!(
                "Defined {} ({}) as #{}, column key dynamic_{}",
                def.name, def.kind, def.id, def.id
            );
        }
        FieldCommands::List { active, paging } => {
            let total = ctx.api.list_definitions(active)?.len();
            let state = page_state(&paging, ctx.config.page_size(), total);
            let page = ctx.api.definition_page(active, &state)?;
            println!("{}", render::definitions(&page.items));
            println!("\n{}", render::page_footer(&page));
        }
        FieldCommands::Update {
            id,
            name,
            required,
            active,
        } => {
            let patch = DefinitionPatch {
                name,
                kind: None,
                required,
                active,
            };
            let def = ctx.api.update_definition(id, &patch)?;
            println!("{}", render::definitions(&[def]));
        }
        FieldCommands::Rm { id } => {
            let deleted = ctx.api.delete_definition(id)?;
            println!(
                "Deleted {} and {} value(s)",
                deleted.definition.name, deleted.removed_values
            );
        }
    }
    Ok(())
}

fn read_artifact(path: &Path) -> Result<ArtifactPayload> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(ArtifactPayload::new(name, bytes))
}

fn value(ctx: &mut RosterContext, cmd: ValueCommands) -> Result<()> {
    match cmd {
        ValueCommands::Set {
            person,
            field,
            value,
            file,
        } => {
            let artifact = file.as_deref().map(read_artifact).transpose()?;
            let stored = ctx.api.create_value(
                person,
                field,
                value.as_deref().unwrap_or_default(),
                artifact,
            )?;
            println!("Stored value #{}", stored.id);
        }
        ValueCommands::Update { id, value, file } => {
            let artifact = file.as_deref().map(read_artifact).transpose()?;
            let stored = ctx.api.update_value(id, value.as_deref(), artifact)?;
            println!("Updated value #{}", stored.id);
        }
        ValueCommands::List { person } => {
            ctx.api.get_owner(person)?;
            let values = ctx.api.list_values(person)?;
            let definitions = ctx.api.list_definitions(false)?;
            if values.is_empty() {
                println!("No values for #{}", person);
            } else {
                println!("{}", render::values(&values, &definitions));
            }
        }
        ValueCommands::Rm { id } => {
            ctx.api.delete_value(id)?;
            println!("Deleted value #{}", id);
        }
    }
    Ok(())
}

fn grid(ctx: &mut RosterContext, args: GridArgs) -> Result<()> {
    let input = SearchInput {
        text: args.text,
        min: args.min,
        max: args.max,
        start: args.start,
        end: args.end,
    };
    let preference = ctx.api.column_preference()?;
    let total = ctx.api.search_owners(&args.field, &input)?.len();

    let mut state = page_state(&args.paging, ctx.config.page_size(), total);
    let wanted = state.page_index();
    // Seed the search first, otherwise the grid treats it as new and resets
    state.observe_search(&args.field, &input);
    state.go_to(wanted, total.div_ceil(state.page_size()).max(1));

    let view = ctx
        .api
        .owner_grid(&args.field, &input, &mut state, &preference)?;
    println!("{}", render::grid(&view));
    Ok(())
}

fn columns(ctx: &mut RosterContext, cmd: ColumnCommands) -> Result<()> {
    match cmd {
        ColumnCommands::List => {
            let preference = ctx.api.column_preference()?;
            let fields = ctx.api.available_fields()?;
            let headers = ["Shown", "Key", "Label", "Kind"].map(String::from);
            let rows: Vec<Vec<String>> = fields
                .iter()
                .map(|f| {
                    vec![
                        if preference.contains(&f.key) { "x" } else { "" }.to_string(),
                        f.key.clone(),
                        f.label.clone(),
                        f.kind.to_string(),
                    ]
                })
                .collect();
            println!("{}", render::table(&headers, &rows));
        }
        ColumnCommands::Toggle { key } => {
            let visible = ctx.api.toggle_column(&key)?;
            println!(
                "Column {} is now {}",
                key,
                if visible { "shown" } else { "hidden" }
            );
        }
    }
    Ok(())
}
