use quill_core::db::open_db_in_memory;
use quill_core::{App, Identity, Page, RegistrationForm, Request, Response};
use uuid::Uuid;

#[test]
fn register_page_is_served_to_everyone() {
    let conn = open_db_in_memory().unwrap();
    let app = App::new(&conn).unwrap();

    let anonymous = app.handle(&Request::get("/register"));
    assert_eq!(anonymous.status(), 200);
    assert_eq!(anonymous.page().unwrap().view_name(), "auth.register");

    let logged_in = app.handle(&Request::get("/register").acting_as(Uuid::new_v4()));
    assert!(logged_in.is_success());
}

#[test]
fn login_page_is_served_to_everyone() {
    let conn = open_db_in_memory().unwrap();
    let app = App::new(&conn).unwrap();

    let response = app.handle(&Request::get("/login"));
    assert_eq!(response.status(), 200);
    assert_eq!(response.page().unwrap().view_name(), "auth.login");
}

#[test]
fn registration_creates_user_and_redirects_to_profile() {
    let conn = open_db_in_memory().unwrap();
    let app = App::new(&conn).unwrap();

    let response = app.handle(&Request::post(
        "/register",
        [("name", "Ada"), ("email", "ada@example.com")],
    ));
    let location = response.location().expect("redirect").to_string();
    assert!(location.starts_with("/users/"));

    let profile = app.handle(&Request::get(&location));
    match profile {
        Response::Page(Page::UserProfile { user, articles }) => {
            assert_eq!(format!("/users/{}", user.id), location);
            assert_eq!(user.email, "ada@example.com");
            assert!(articles.is_empty());
        }
        other => panic!("unexpected response: {other:?}"),
    }
}

#[test]
fn registration_with_taken_email_rerenders_form() {
    let conn = open_db_in_memory().unwrap();
    let app = App::new(&conn).unwrap();
    let request = Request::post("/register", [("name", "Ada"), ("email", "ada@example.com")]);

    assert_eq!(app.handle(&request).status(), 302);

    let again = app.handle(&request);
    assert_eq!(again.status(), 200);
    let errors = again.page().unwrap().errors().unwrap();
    assert!(errors.get("email").unwrap().contains("taken"));
}

#[test]
fn anyone_can_see_a_profile() {
    let conn = open_db_in_memory().unwrap();
    let app = App::new(&conn).unwrap();
    let ada = app
        .users()
        .register(&quill_core::RegistrationForm::new("Ada", "ada@example.com"))
        .unwrap();

    let response = app.handle(&Request::get(format!("/users/{}", ada.id)));
    assert_eq!(response.page().unwrap().view_name(), "users.show");
    assert!(response.body().contains(&ada.id.to_string()));
}

#[test]
fn unknown_profile_and_unknown_route_are_not_found() {
    let conn = open_db_in_memory().unwrap();
    let app = App::new(&conn).unwrap();

    assert_eq!(
        app.handle(&Request::get(format!("/users/{}", Uuid::new_v4()))),
        Response::NotFound
    );
    assert_eq!(app.handle(&Request::get("/admin")), Response::NotFound);
}

#[test]
fn only_registered_identities_stay_authenticated() {
    let conn = open_db_in_memory().unwrap();
    let app = App::new(&conn).unwrap();
    let ada = app
        .users()
        .register(&RegistrationForm::new("Ada", "ada@example.com"))
        .unwrap();

    let known = Identity::Authenticated(ada.id);
    assert_eq!(app.users().resolve_identity(&known).unwrap(), known);

    let stranger = Identity::Authenticated(Uuid::new_v4());
    assert_eq!(
        app.users().resolve_identity(&stranger).unwrap(),
        Identity::Anonymous
    );
    assert_eq!(
        app.users().resolve_identity(&Identity::Anonymous).unwrap(),
        Identity::Anonymous
    );
}
