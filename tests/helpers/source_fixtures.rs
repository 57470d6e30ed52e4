//! Common Robot Framework sources for tests.

pub const FULL_SUITE: &str = "\
*** Settings ***
Documentation    Login tests
...              for the web shop
Library          SeleniumLibrary    timeout=5    WITH NAME    Browser
Resource         common.resource
Suite Setup      Open Shop    ${URL}
Force Tags       web
Force Tags       smoke    # repeated
Metadata         Owner    qa

*** Variables ***
${URL}           http://localhost
@{USERS}         alice    bob
&{LIMITS}        max=3    min=1

*** Test Cases ***
Valid Login
    [Tags]    positive
    ${name}=    Set Variable    alice
    Login As    ${name}
    # checked below
    Page Should Contain    Welcome

*** Keywords ***
Login As
    [Arguments]    ${user}
    Input Text    id=user    ${user}
    ...    clear=True
";

pub const REPEATED_SETTINGS: &str = "\
*** Settings ***
Force Tags    a    b
Default Tags    d
Force Tags    c
";

pub const PIPE_SUITE: &str = "\
| *** Settings *** |
| Library | OperatingSystem |
| *** Test Cases *** |
| Listing |
| | List Directory | /tmp |
";

pub const TSV_SUITE: &str = "*** Settings ***\nLibrary\tCollections\n*** Test Cases ***\nT\n\tLog\t\tx\n";

pub const MALFORMED: &str = "\
stray line before any table
*** Settings ***
Library    Foo
[Tags]    not here
...    orphan?
*** Unknown Table ***
whatever    is here
*** Test Cases ***
    indented step without a test
Real Test
    No Operation
";
