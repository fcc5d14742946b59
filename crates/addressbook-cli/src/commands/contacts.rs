use crate::commands::{print_json, Context};
use crate::util::{
    format_contact_line, normalize_optional_value, parse_contact_id, parse_date, sort_contacts,
};
use addressbook_core::{AddressBook, ContactNew};
use anyhow::Result;
use clap::Args;
use tracing::debug;

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub surname: Option<String>,
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub birthday: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    pub id: String,
}

#[derive(Debug, Args)]
pub struct ListArgs {}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    pub id: String,
}

pub fn add_contact(ctx: &mut Context<'_>, args: AddArgs) -> Result<()> {
    let birthday = match args.birthday {
        Some(value) => Some(parse_date(&value)?),
        None => None,
    };
    let contact = ContactNew {
        first_name: Some(args.first_name),
        surname: args.surname,
        birthday,
        phone: normalize_optional_value(args.phone),
    };

    let id = ctx.book.add_contact(contact)?;
    debug!(id = %id, "contact added");
    if ctx.json {
        let contact = ctx.book.get_contact(&id)?;
        print_json(&contact)?;
    } else {
        println!("created {}", id);
    }
    Ok(())
}

pub fn show_contact(ctx: &mut Context<'_>, args: ShowArgs) -> Result<()> {
    let id = parse_contact_id(&args.id)?;
    let contact = ctx.book.get_contact(&id)?;
    if ctx.json {
        print_json(&contact)?;
        return Ok(());
    }

    println!("id: {}", contact.id);
    println!("first name: {}", contact.first_name);
    if let Some(surname) = contact.surname.as_deref() {
        println!("surname: {}", surname);
    }
    if let Some(birthday) = contact.birthday {
        println!("birthday: {}", birthday.format("%Y-%m-%d"));
    }
    if let Some(phone) = contact.phone.as_deref() {
        println!("phone: {}", phone);
    }
    Ok(())
}

pub fn list_contacts(ctx: &mut Context<'_>, _args: ListArgs) -> Result<()> {
    let mut contacts = ctx.book.get_all()?;
    sort_contacts(&mut contacts);
    if ctx.json {
        print_json(&contacts)?;
        return Ok(());
    }
    for contact in &contacts {
        println!("{}", format_contact_line(contact));
    }
    Ok(())
}

pub fn delete_contact(ctx: &mut Context<'_>, args: DeleteArgs) -> Result<()> {
    let id = parse_contact_id(&args.id)?;
    ctx.book.delete_contact(&id)?;
    if ctx.json {
        print_json(&serde_json::json!({ "id": id }))?;
    } else {
        println!("deleted {}", id);
    }
    Ok(())
}
