use tracing::debug;

use super::command::{Cli, Commands};
use crate::config::AppConfig;
use crate::controller::{ContactStateController, Snapshot};
use crate::domain::{Category, Contact, ContactDraft, ContactId};
use crate::errors::AppError;

pub async fn run_app(cli: Cli) -> Result<(), AppError> {
    let config = AppConfig::new(&cli.storage, cli.data_dir, cli.latency_ms)?;
    let controller = config.open_controller();

    debug!(medium = controller.store().medium(), "starting rolodex");

    match cli.command {
        Commands::List { category } => {
            match category {
                Some(category) => controller.filter_by_category(&category).await,
                None => controller.refresh().await,
            }
            let snapshot = checked(&controller)?;

            if snapshot.contacts.is_empty() {
                println!("No contact yet");
                return Ok(());
            }
            print_rows(&snapshot.contacts);
            Ok(())
        }

        Commands::Search { query } => {
            controller.search(&query).await;
            let snapshot = checked(&controller)?;

            if snapshot.contacts.is_empty() {
                println!("Couldn't find a contact matching {query}");
                return Ok(());
            }
            print_rows(&snapshot.contacts);
            Ok(())
        }

        Commands::Show { id } => {
            let id = ContactId::from(id);
            match controller.get_by_id(&id).await? {
                Some(contact) => {
                    print_details(&contact);
                    Ok(())
                }
                None => Err(AppError::NotFound(format!("Contact {id}"))),
            }
        }

        Commands::Add {
            first_name,
            last_name,
            email,
            phone,
            category,
            address,
            company,
            notes,
        } => {
            let draft = ContactDraft {
                first_name,
                last_name,
                email,
                phone,
                category,
                address,
                company,
                notes,
            };
            draft.validate()?;

            let contact = controller.add(draft).await?;
            println!("Contact added successfully: {}", contact.id);
            Ok(())
        }

        Commands::Edit {
            id,
            first_name,
            last_name,
            email,
            phone,
            category,
            address,
            company,
            notes,
        } => {
            let id = ContactId::from(id);
            let Some(existing) = controller.get_by_id(&id).await? else {
                return Err(AppError::NotFound(format!("Contact {id}")));
            };

            let mut draft = ContactDraft::from(&existing);
            if let Some(first_name) = first_name {
                draft.first_name = first_name;
            }
            if let Some(last_name) = last_name {
                draft.last_name = last_name;
            }
            if let Some(email) = email {
                draft.email = email;
            }
            if let Some(phone) = phone {
                draft.phone = phone;
            }
            if let Some(category) = category {
                draft.category = category;
            }
            draft.address = address;
            draft.company = company;
            draft.notes = notes;
            draft.validate()?;

            match controller.update(&id, draft).await {
                Some(_) => {
                    println!("Contact updated successfully");
                    Ok(())
                }
                None => {
                    checked(&controller)?;
                    Err(AppError::NotFound(format!("Contact {id}")))
                }
            }
        }

        Commands::Delete { id } => {
            let id = ContactId::from(id);
            if controller.remove(&id).await {
                println!("Contact deleted successfully");
                return Ok(());
            }

            checked(&controller)?;
            Err(AppError::NotFound(format!("Contact {id}")))
        }

        Commands::Categories => {
            for category in Category::ALL {
                println!("{:<10} {}", category.as_str(), category.label());
            }
            Ok(())
        }
    }
}

/// Surfaces the snapshot's failure category, if any, as an error.
fn checked(controller: &ContactStateController) -> Result<Snapshot, AppError> {
    let snapshot = controller.snapshot();
    match snapshot.error {
        Some(failed) => Err(AppError::Operation(failed.to_string())),
        None => Ok(snapshot),
    }
}

fn print_rows(contacts: &[Contact]) {
    for (mut i, c) in contacts.iter().enumerate() {
        i += 1;
        println!(
            "{i:>3}. {:<38} {:<20} {:18} {:^30} {:<10}",
            c.id.as_str(),
            c.full_name(),
            c.phone,
            c.email,
            c.category().label()
        );
    }
}

fn print_details(c: &Contact) {
    println!("[{}] {}", c.initials(), c.full_name());
    println!("  id:       {}", c.id);
    println!("  email:    {}", c.email);
    println!("  phone:    {}", c.phone);
    println!("  category: {}", c.category().label());

    if let Some(company) = &c.company {
        println!("  company:  {company}");
    }
    if let Some(address) = &c.address {
        println!("  address:  {address}");
    }
    if let Some(notes) = &c.notes {
        println!("  notes:    {notes}");
    }

    println!("  created:  {}", c.created_at.date_naive());
    println!("  updated:  {}", c.updated_at.date_naive());
}
