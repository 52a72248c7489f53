//! Employee registry and tabular import.
//!
//! The [`EmployeeRegistry`] holds employee records in insertion order and
//! loads them from CSV tables. The import contract accepts the English
//! column names written by [`EmployeeRegistry::save_to_path`] as well as the
//! German headers of older tables (`Personalnummer`, `Nachname`, ...).
//! The allowed ranks and units are kept as [`ValueList`]s.
//!
//! # Example
//!
//! ```
//! use personnel_ledger::registry::EmployeeRegistry;
//!
//! let table = "identifier,last_name,first_name,work_model\n1001,Müller,Hans,Vollzeit\n";
//! let mut registry = EmployeeRegistry::new();
//! let report = registry.load_from_table(table.as_bytes()).unwrap();
//!
//! assert_eq!(report.loaded, 1);
//! assert_eq!(registry.find_employee("1001").unwrap().first_name, "Hans");
//! assert!(registry.find_employee("9999").is_none());
//! ```

mod employee_registry;
mod import;
mod value_list;

pub use employee_registry::EmployeeRegistry;
pub use import::{EMPLOYEE_HEADERS, ImportPolicy, ImportReport, RowError};
pub use value_list::{RANK_COLUMN, UNIT_COLUMN, ValueList};
