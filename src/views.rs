//! Server-rendered HTML views.
//!
//! Every page is assembled here so the handlers stay free of markup. All
//! record values pass through [`escape`] before being interpolated; form
//! prefills use the escaped value inside a quoted attribute.

use frontdesk_core::{Patient, StaffSession};

/// Wrap a page body in the shared document shell.
fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n<body>\n{}\n</body>\n</html>",
        escape(title),
        body
    )
}

/// Minimal HTML escaping for text nodes and quoted attribute values.
pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub fn welcome_page() -> String {
    page(
        "Welcome to XYZ Hospital",
        "<h1>Welcome to XYZ Hospital</h1>\n<p><a href=\"/login\">Staff login</a></p>",
    )
}

pub fn login_page() -> String {
    page(
        "login",
        concat!(
            "<h1>Staff login</h1>\n",
            "<form method=\"post\" action=\"/login\">\n",
            "<label>User id <input type=\"text\" name=\"username\"></label><br>\n",
            "<label>Password <input type=\"password\" name=\"password\"></label><br>\n",
            "<button type=\"submit\">Log in</button>\n",
            "</form>"
        ),
    )
}

pub fn no_such_user_page() -> String {
    page("login", "<h2>No such user exists</h2>")
}

pub fn user_home_page(staff: &StaffSession) -> String {
    let body = format!(
        concat!(
            "<h1>User Home Page</h1>\n",
            "<p>Logged in as {} ({}), role: {}</p>\n",
            "<ul>\n",
            "<li><a href=\"/patients\">View patient details</a></li>\n",
            "<li><a href=\"/addnewpatient\">Add a new patient</a></li>\n",
            "<li><a href=\"/updateDetails\">Update patient details</a></li>\n",
            "</ul>\n",
            "<form method=\"post\" action=\"/logout\"><button type=\"submit\">Log out</button></form>"
        ),
        escape(&staff.display_name),
        escape(&staff.user_id),
        escape(&staff.role),
    );
    page("User Home Page", &body)
}

pub fn patients_page(patients: &[Patient]) -> String {
    let mut rows = String::new();
    for p in patients {
        rows.push_str(&format!(
            concat!(
                "<tr><td>{ssn}</td><td>{id}</td><td>{name}</td><td>{address}</td>",
                "<td>{age}</td><td>{doj}</td><td>{rtype}</td><td>{status}</td>",
                "<td><a href=\"/updateDetails?id={id}\">edit</a></td></tr>\n"
            ),
            ssn = p.ssn,
            id = p.patient_id,
            name = escape(&p.name),
            address = escape(&p.address),
            age = p.age,
            doj = escape(&p.date_of_joining),
            rtype = escape(&p.registration_type),
            status = p.status,
        ));
    }

    let body = format!(
        concat!(
            "<h1>Patient details</h1>\n",
            "<table border=\"1\">\n",
            "<tr><th>SSN</th><th>Patient id</th><th>Name</th><th>Address</th>",
            "<th>Age</th><th>Date of joining</th><th>Registration type</th><th>Status</th><th></th></tr>\n",
            "{}",
            "</table>\n",
            "<p><a href=\"/addnewpatient\">Add a new patient</a> | <a href=\"/user\">Home</a></p>"
        ),
        rows
    );
    page("patients details", &body)
}

pub fn add_patient_page() -> String {
    page(
        "add new patient",
        concat!(
            "<h1>Add a new patient</h1>\n",
            "<form method=\"post\" action=\"/addnewpatient\">\n",
            "<label>SSN <input type=\"text\" name=\"ssn\"></label><br>\n",
            "<label>Name <input type=\"text\" name=\"name\"></label><br>\n",
            "<label>Address <input type=\"text\" name=\"address\"></label><br>\n",
            "<label>Age <input type=\"text\" name=\"age\"></label><br>\n",
            "<label>Registration type <input type=\"text\" name=\"registration_type\" value=\"General\"></label><br>\n",
            "<button type=\"submit\">Register patient</button>\n",
            "</form>"
        ),
    )
}

/// The edit form. With a patient the fields are prefilled and the id is
/// fixed; without one the clerk types the id by hand.
pub fn update_form_page(patient: Option<&Patient>) -> String {
    let body = match patient {
        Some(p) => format!(
            concat!(
                "<h1>Update patient details</h1>\n",
                "<form method=\"post\" action=\"/updateDetails\">\n",
                "<label>Patient id <input type=\"text\" name=\"patient_id\" value=\"{id}\" readonly></label><br>\n",
                "<label>SSN <input type=\"text\" name=\"ssn\" value=\"{ssn}\"></label><br>\n",
                "<label>Name <input type=\"text\" name=\"name\" value=\"{name}\"></label><br>\n",
                "<label>Age <input type=\"text\" name=\"age\" value=\"{age}\"></label><br>\n",
                "<label>Address <input type=\"text\" name=\"address\" value=\"{address}\"></label><br>\n",
                "<label>Registration type <input type=\"text\" name=\"registration_type\" value=\"{rtype}\"></label><br>\n",
                "<button type=\"submit\">Update</button>\n",
                "</form>"
            ),
            id = p.patient_id,
            ssn = p.ssn,
            name = escape(&p.name),
            age = p.age,
            address = escape(&p.address),
            rtype = escape(&p.registration_type),
        ),
        None => concat!(
            "<h1>Update patient details</h1>\n",
            "<form method=\"post\" action=\"/updateDetails\">\n",
            "<label>Patient id <input type=\"text\" name=\"patient_id\"></label><br>\n",
            "<label>SSN <input type=\"text\" name=\"ssn\"></label><br>\n",
            "<label>Name <input type=\"text\" name=\"name\"></label><br>\n",
            "<label>Age <input type=\"text\" name=\"age\"></label><br>\n",
            "<label>Address <input type=\"text\" name=\"address\"></label><br>\n",
            "<label>Registration type <input type=\"text\" name=\"registration_type\"></label><br>\n",
            "<button type=\"submit\">Update</button>\n",
            "</form>"
        )
        .to_string(),
    };
    page("update patient details", &body)
}

pub fn no_such_record_page() -> String {
    page("update patient details", "<h1>no such records found!</h1>")
}

/// Bare acknowledgement body for a successful update.
pub fn updated_ack() -> &'static str {
    "updated!"
}

pub fn server_error_page() -> String {
    page(
        "error",
        "<h1>Something went wrong</h1>\n<p>The request could not be completed.</p>",
    )
}

pub fn not_found_page() -> String {
    page("page not found", "<h1>Page not found</h1>")
}
