//! Named GraphQL documents sent to `/graphql`.

pub const GET_PROFILE: &str = r"
query GetProfile($userId: UUID!) {
  profile(userId: $userId) {
    userId
    legalFirstName
    legalLastName
    preferredName
    email
    employeeId
    department
    jobCode
    jobFamily
    jobLevel
    employmentStatus
    hireDate
    terminationDate
    fte
    jobTitle
    officeLocation
    workPhone
    workLocationType
    bio
    skills
    profilePhotoUrl
    personalEmail
    personalPhone
    homeAddress
    emergencyContactName
    emergencyContactPhone
    emergencyContactRelationship
    dateOfBirth
    visaWorkPermit
    absenceBalanceDays
    salary
    performanceRating
    createdAt
    updatedAt
    metadata {
      relationship
      visibleFields
      editableFields
    }
  }
}
";

pub const GET_FEEDBACK_FOR_USER: &str = r"
query GetFeedbackForUser($userId: UUID!) {
  feedbackForUser(userId: $userId) {
    id
    text
    aiPolished
    createdAt
    author { id email employeeId profile { preferredName legalFirstName legalLastName } }
    recipient { id email employeeId profile { preferredName legalFirstName legalLastName } }
  }
}
";

pub const GET_MY_AUTHORED_FEEDBACK: &str = r"
query GetMyAuthoredFeedback {
  myAuthoredFeedback {
    id
    text
    aiPolished
    createdAt
    author { id email employeeId profile { preferredName legalFirstName legalLastName } }
    recipient { id email employeeId profile { preferredName legalFirstName legalLastName } }
  }
}
";

pub const GET_MY_RECEIVED_FEEDBACK: &str = r"
query GetMyReceivedFeedback {
  myReceivedFeedback {
    id
    text
    aiPolished
    createdAt
    author { id email employeeId profile { preferredName legalFirstName legalLastName } }
    recipient { id email employeeId profile { preferredName legalFirstName legalLastName } }
  }
}
";

pub const GET_COWORKER_DIRECTORY: &str = r"
query GetCoworkerDirectory($search: String, $department: String, $directReportsOnly: Boolean) {
  coworkerDirectory(search: $search, department: $department, directReportsOnly: $directReportsOnly) {
    userId
    employeeId
    preferredName
    legalFirstName
    legalLastName
    jobTitle
    department
    workLocationType
    profilePhotoUrl
    relationship
    directReport
    pendingAbsenceCount
  }
}
";

const ABSENCE_FIELDS: &str = "id userId managerId startDate endDate type status note";

pub fn my_absence_requests() -> String {
    format!("query GetMyAbsenceRequests {{ myAbsenceRequests {{ {ABSENCE_FIELDS} }} }}")
}

pub fn pending_absence_requests() -> String {
    format!("query GetPendingAbsenceRequests {{ pendingAbsenceRequests {{ {ABSENCE_FIELDS} }} }}")
}
