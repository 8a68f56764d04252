//! OpenAPI documentation, served at `/swagger-ui` and `/scalar`.

use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

use crate::modules::attendance::controller as attendance;
use crate::modules::attendance::model::{
    AttendanceStatus, RecordEntry, RecordWithStudent, SessionDetail, SessionRow, SessionSummary,
    UpsertSessionDto,
};
use crate::modules::auth::controller as auth;
use crate::modules::auth::model::{AuthResponse, LoginRequest, SignupRequest};
use crate::modules::courses::controller as courses;
use crate::modules::courses::model::{Course, CourseWithFaculty, CreateCourseDto, UpdateCourseDto};
use crate::modules::departments::controller as departments;
use crate::modules::departments::model::{
    CreateDepartmentDto, Department, UpdateDepartmentDto,
};
use crate::modules::faculty::controller as faculty;
use crate::modules::faculty::model::{
    CreateFacultyDto, CreateFacultyResponse, EmploymentStatus, FacultyProfile, FacultyWithProfile,
    UpdateFacultyProfileDto,
};
use crate::modules::students::controller as students;
use crate::modules::students::model::{
    StudentProfile, StudentWithProfile, UpdateStudentProfileDto,
};
use crate::modules::users::controller as users;
use crate::modules::users::model::{UpdateRoleDto, UpdateStatusDto, User, UserRole};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Campus ERP API",
        description = "College ERP backend: authentication, role-gated \
            administration of courses, departments, students, faculty and \
            attendance, plus self-service profiles.",
        version = "0.1.0"
    ),
    paths(
        auth::signup,
        auth::login,
        auth::refresh,
        users::update_user_role,
        students::list_students,
        students::get_student_profile,
        students::update_student_profile,
        students::update_student_status,
        students::get_my_profile,
        students::update_my_profile,
        faculty::create_faculty,
        faculty::list_faculty,
        faculty::get_faculty_profile,
        faculty::update_faculty_profile,
        faculty::update_faculty_status,
        faculty::get_my_faculty_profile,
        faculty::update_my_faculty_profile,
        courses::create_course,
        courses::list_courses,
        courses::get_course,
        courses::update_course,
        courses::delete_course,
        courses::my_courses,
        departments::create_department,
        departments::list_departments,
        departments::get_department,
        departments::update_department,
        departments::delete_department,
        attendance::list_sessions,
        attendance::upsert_session,
        attendance::get_session,
        attendance::delete_session,
    ),
    components(schemas(
        UserRole,
        User,
        UpdateRoleDto,
        UpdateStatusDto,
        users::UserResponse,
        SignupRequest,
        LoginRequest,
        AuthResponse,
        StudentProfile,
        UpdateStudentProfileDto,
        StudentWithProfile,
        students::ProfileResponse,
        students::StudentListResponse,
        EmploymentStatus,
        FacultyProfile,
        CreateFacultyDto,
        UpdateFacultyProfileDto,
        FacultyWithProfile,
        CreateFacultyResponse,
        faculty::FacultyProfileResponse,
        faculty::FacultyListResponse,
        Course,
        CourseWithFaculty,
        CreateCourseDto,
        UpdateCourseDto,
        courses::CourseListResponse,
        courses::MyCoursesResponse,
        Department,
        CreateDepartmentDto,
        UpdateDepartmentDto,
        departments::DepartmentListResponse,
        AttendanceStatus,
        RecordEntry,
        UpsertSessionDto,
        SessionSummary,
        RecordWithStudent,
        SessionRow,
        SessionDetail,
        attendance::SessionListResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Registration, login and token refresh"),
        (name = "Users", description = "Account role management"),
        (name = "Students", description = "Student accounts and profiles"),
        (name = "Faculty", description = "Faculty accounts and profiles"),
        (name = "Courses", description = "Course catalog"),
        (name = "Departments", description = "Department registry"),
        (name = "Attendance", description = "Roll call sessions"),
        (name = "Profile", description = "Self-service profiles")
    )
)]
pub struct ApiDoc;
