//! Conversions between SSM SDK types and core types

use aws_sdk_ssm::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_ssm::operation::get_parameters_by_path::GetParametersByPathError;
use aws_sdk_ssm::types::Parameter;
use paramstore_json_core::{ParameterKind, ParameterRecord, SourceError};

/// Path sent to `GetParametersByPath`
///
/// The service requires a path starting with `/`; an empty prefix means the
/// hierarchy root.
pub fn request_path(prefix: &str) -> &str {
    if prefix.is_empty() {
        "/"
    } else {
        prefix
    }
}

/// Convert an SDK parameter into a record
///
/// Parameters without a name are skipped. A missing value reads as empty.
pub fn parameter_to_record(parameter: &Parameter) -> Option<ParameterRecord> {
    let Some(name) = parameter.name() else {
        tracing::warn!("SSM parameter without a name, skipped");
        return None;
    };
    let kind = parameter
        .r#type()
        .map(|t| ParameterKind::from_type_name(t.as_str()))
        .unwrap_or(ParameterKind::Plain);

    Some(ParameterRecord::new(
        name,
        kind,
        parameter.value().unwrap_or_default(),
    ))
}

/// Map an SDK error to SourceError with proper classification
///
/// Modeled error variants are checked first, then the error code, then the
/// HTTP status.
pub fn map_ssm_error(err: SdkError<GetParametersByPathError>, path: &str) -> SourceError {
    match &err {
        SdkError::ServiceError(service_err) => {
            let inner = service_err.err();
            match inner {
                GetParametersByPathError::InvalidNextToken(_) => {
                    return SourceError::invalid_parameter(format!(
                        "Invalid next token for path '{}'",
                        path
                    ));
                }
                GetParametersByPathError::InvalidFilterKey(_)
                | GetParametersByPathError::InvalidFilterOption(_)
                | GetParametersByPathError::InvalidFilterValue(_) => {
                    return SourceError::invalid_parameter(format!(
                        "Invalid request for path '{}': {}",
                        path,
                        inner.message().unwrap_or("invalid filter")
                    ));
                }
                GetParametersByPathError::InvalidKeyId(key_err) => {
                    return SourceError::forbidden(format!(
                        "Cannot decrypt parameters under '{}': {}",
                        path,
                        key_err
                            .message()
                            .or(inner.message())
                            .unwrap_or("invalid KMS key")
                    ));
                }
                GetParametersByPathError::InternalServerError(_) => {
                    return SourceError::throttled(format!(
                        "Retryable SSM internal error for path '{}'",
                        path
                    ));
                }
                _ => {}
            }

            if let Some(classified) = classify_code(inner.code(), path) {
                return classified;
            }

            let status = service_err.raw().status().as_u16();
            match status {
                404 => SourceError::not_found(format!("Path not found: {}", path)),
                401 => SourceError::unauthorized(format!("Unauthorized for path: {}", path)),
                403 => SourceError::forbidden(format!("Access denied for path: {}", path)),
                // Retryable server errors: throttling (429), server errors (500/502/503/504)
                429 | 500 | 502 | 503 | 504 => SourceError::throttled(format!(
                    "Retryable error for path '{}' (HTTP {})",
                    path, status
                )),
                _ => SourceError::io(format!(
                    "SSM error for path '{}' (HTTP {}): {:?}",
                    path, status, err
                )),
            }
        }
        SdkError::TimeoutError(_) => {
            SourceError::io(format!("SSM timeout for path '{}': {:?}", path, err))
        }
        SdkError::DispatchFailure(_) => {
            SourceError::io(format!("SSM connection error for path '{}': {:?}", path, err))
        }
        _ => SourceError::io(format!("SSM error for path '{}': {:?}", path, err)),
    }
}

/// Classify an unmodeled SSM error code
///
/// SSM reports throttling and auth failures as HTTP 400 with an error code,
/// so the code is checked before the status.
fn classify_code(code: Option<&str>, path: &str) -> Option<SourceError> {
    let err = match code? {
        "ThrottlingException" | "TooManyUpdates" => {
            SourceError::throttled(format!("Rate exceeded for path '{}'", path))
        }
        "AccessDeniedException" => {
            SourceError::forbidden(format!("Access denied for path: {}", path))
        }
        "UnrecognizedClientException" | "InvalidSignatureException" | "ExpiredTokenException" => {
            SourceError::unauthorized(format!("Unauthorized for path: {}", path))
        }
        "ValidationException" => {
            SourceError::invalid_parameter(format!("Invalid parameter path: {}", path))
        }
        _ => return None,
    };
    Some(err)
}
